//! Types library for the lock-free order books
//!
//! Value types shared by the matching engine and its drivers. Everything
//! here is plain data: orders are immutable once built, trades are emitted
//! records, and errors describe rejected submissions.
//!
//! # Modules
//! - `ids`: Identifiers (InstrumentId, TradeId)
//! - `numeric`: Integer price and quantity newtypes
//! - `order`: Side, Order, and the untrusted OrderRequest
//! - `trade`: Trade events emitted by matching
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;
