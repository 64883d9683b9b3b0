//! Contention and throughput counters
//!
//! Every book keeps its own counters so instruments never share a cache
//! line through metrics. Counters are Relaxed: they are observational only
//! and never used to coordinate book state.

use std::ops::Add;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Live counters for one order book
#[derive(Debug, Default)]
pub struct BookStats {
    orders_added: AtomicU64,
    add_retries: AtomicU64,
    match_restarts: AtomicU64,
    trades: AtomicU64,
    shares_matched: AtomicU64,
}

impl BookStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an order published to the book.
    pub fn record_order_added(&self) {
        self.orders_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an insert whose compare-and-swap lost a race.
    pub fn record_add_retry(&self) {
        self.add_retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a match step discarded because the book moved underneath it.
    pub fn record_match_restart(&self) {
        self.match_restarts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an applied trade.
    pub fn record_trade(&self, shares: u64) {
        self.trades.fetch_add(1, Ordering::Relaxed);
        self.shares_matched.fetch_add(shares, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            orders_added: self.orders_added.load(Ordering::Relaxed),
            add_retries: self.add_retries.load(Ordering::Relaxed),
            match_restarts: self.match_restarts.load(Ordering::Relaxed),
            trades: self.trades.load(Ordering::Relaxed),
            shares_matched: self.shares_matched.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of book counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub orders_added: u64,
    pub add_retries: u64,
    pub match_restarts: u64,
    pub trades: u64,
    pub shares_matched: u64,
}

impl StatsSnapshot {
    /// Failed swaps per successful update, across adds and match steps
    pub fn contention_ratio(&self) -> f64 {
        let published = self.orders_added + self.trades;
        if published == 0 {
            return 0.0;
        }
        (self.add_retries + self.match_restarts) as f64 / published as f64
    }
}

impl Add for StatsSnapshot {
    type Output = StatsSnapshot;

    fn add(self, rhs: StatsSnapshot) -> StatsSnapshot {
        StatsSnapshot {
            orders_added: self.orders_added + rhs.orders_added,
            add_retries: self.add_retries + rhs.add_retries,
            match_restarts: self.match_restarts + rhs.match_restarts,
            trades: self.trades + rhs.trades,
            shares_matched: self.shares_matched + rhs.shares_matched,
        }
    }
}

impl std::iter::Sum for StatsSnapshot {
    fn sum<I: Iterator<Item = StatsSnapshot>>(iter: I) -> StatsSnapshot {
        iter.fold(StatsSnapshot::default(), Add::add)
    }
}
