//! Matching Engine Service
//!
//! Per-instrument order books that accept concurrently submitted limit
//! orders and match them continuously without locks.
//!
//! **Concurrency model:**
//! - Each book publishes an immutable snapshot of both sides
//! - Updates copy the snapshot, modify the copy, and compare-and-swap it in
//! - A lost swap is retried against the newer snapshot (lock-free, not wait-free)
//! - Different instruments never contend
//!
//! **Key Invariants:**
//! - Bids sorted by price descending, asks ascending, ties by arrival
//! - After a matching pass the book is not crossed
//! - Resting orders always have positive quantity
//! - Conservation of quantity

pub mod book;
pub mod config;
pub mod matching;
pub mod engine;
pub mod events;
pub mod metrics;

pub use book::OrderBook;
pub use config::MarketConfig;
pub use engine::Market;
pub use events::{ChannelListener, LogListener, NoopListener, TradeListener};
