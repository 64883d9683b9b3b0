//! Order book infrastructure module
//!
//! Contains the copy-on-write side sequences, the published snapshot, and
//! the lock-free book that swaps snapshots.

pub mod side;
pub mod bid_book;
pub mod ask_book;
pub mod snapshot;
pub mod order_book;

pub use side::{SideOrders, SidePriority};
pub use bid_book::BidBook;
pub use ask_book::AskBook;
pub use snapshot::{BookSnapshot, DepthSnapshot};
pub use order_book::OrderBook;
