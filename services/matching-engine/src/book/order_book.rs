//! Lock-free order book for a single instrument
//!
//! The book publishes its state as an immutable [`BookSnapshot`] behind an
//! atomically swappable `Arc`. Writers never lock: each update loads the
//! current snapshot, builds a modified copy, and compare-and-swaps it in.
//! A failed swap means another writer got there first; the copy is dropped
//! and the update is rebuilt against the newer snapshot.
//!
//! Replaced snapshots are freed when the last reader holding them lets go.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use crossbeam::utils::Backoff;
use tracing::{debug, trace};

use types::ids::InstrumentId;
use types::numeric::Quantity;
use types::order::Order;
use types::trade::TradeEvent;

use super::snapshot::{BookSnapshot, DepthSnapshot};
use crate::matching::executor::{execute, find_fill};
use crate::metrics::{BookStats, StatsSnapshot};

/// Order book for one instrument
pub struct OrderBook {
    instrument: InstrumentId,
    /// Current published state
    state: ArcSwap<BookSnapshot>,
    /// Arrival stamps for tie-breaking equal prices
    arrivals: AtomicU64,
    stats: BookStats,
}

impl OrderBook {
    /// Create an empty book
    pub fn new(instrument: InstrumentId) -> Self {
        Self {
            instrument,
            state: ArcSwap::from_pointee(BookSnapshot::new()),
            arrivals: AtomicU64::new(0),
            stats: BookStats::new(),
        }
    }

    pub fn instrument(&self) -> InstrumentId {
        self.instrument
    }

    /// Insert an order on its side, keeping price priority
    ///
    /// The order is stamped with the book's next arrival sequence before
    /// the first attempt, so retries keep its place among equal prices.
    pub fn add_order(&self, order: Order) {
        let order = order.with_sequence(self.arrivals.fetch_add(1, Ordering::Relaxed));
        let backoff = Backoff::new();

        loop {
            let current = self.state.load_full();
            let next = current.with_order(order);

            if self.try_publish(&current, next) {
                self.stats.record_order_added();
                debug!(
                    instrument = %self.instrument,
                    side = %order.side,
                    price = %order.price,
                    quantity = %order.quantity,
                    sequence = order.sequence,
                    "Order added"
                );
                return;
            }

            self.stats.record_add_retry();
            trace!(instrument = %self.instrument, "Add lost compare-and-swap race, retrying");
            backoff.spin();
        }
    }

    /// Match crossing orders until the book is no longer crossed
    ///
    /// Each step fills the best bid against the best ask and publishes both
    /// sides in one swap, together with the step's trade sequence. A step
    /// whose swap fails is discarded and the pass resumes from the latest
    /// snapshot. Trades are returned in the order their steps were
    /// published; a discarded step never produces one.
    pub fn match_orders(&self) -> Vec<TradeEvent> {
        let mut trades = Vec::new();
        let backoff = Backoff::new();

        loop {
            let current = self.state.load_full();

            let Some(fill) = find_fill(&current) else {
                break;
            };
            let next = current.apply_fill(&fill);
            let sequence = next.trade_sequence();

            if self.try_publish(&current, next) {
                let trade = execute(self.instrument, sequence, &fill);
                self.stats.record_trade(fill.quantity.as_u64());
                trace!(
                    instrument = %self.instrument,
                    sequence,
                    buy_price = %fill.buy.price,
                    sell_price = %fill.sell.price,
                    quantity = %fill.quantity,
                    "Match step published"
                );
                trades.push(trade);
                backoff.reset();
            } else {
                self.stats.record_match_restart();
                trace!(instrument = %self.instrument, "Book moved during match step, restarting");
                backoff.spin();
            }
        }

        if !trades.is_empty() {
            debug!(
                instrument = %self.instrument,
                trades = trades.len(),
                "Match pass complete"
            );
        }

        trades
    }

    /// Owned copy of the current state
    ///
    /// Cheap: the sides are shared with the published snapshot.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot::clone(&self.state.load())
    }

    pub fn best_bid(&self) -> Option<Order> {
        self.state.load().best_bid().copied()
    }

    pub fn best_ask(&self) -> Option<Order> {
        self.state.load().best_ask().copied()
    }

    pub fn is_crossed(&self) -> bool {
        self.state.load().is_crossed()
    }

    pub fn resting_quantity(&self) -> Quantity {
        self.state.load().resting_quantity()
    }

    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        self.state.load().depth(levels)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Swap `next` in if the book still holds `current`
    fn try_publish(&self, current: &Arc<BookSnapshot>, next: BookSnapshot) -> bool {
        let previous = self.state.compare_and_swap(current, Arc::new(next));
        Arc::ptr_eq(&previous, current)
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("instrument", &self.instrument)
            .field("state", &self.snapshot())
            .finish()
    }
}
