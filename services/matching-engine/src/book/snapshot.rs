//! Published book state
//!
//! A `BookSnapshot` is the unit the order book swaps atomically. Both sides
//! live in the same snapshot so a match step replaces them together, along
//! with the count of trades published so far.

use serde::Serialize;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::ask_book::AskBook;
use super::bid_book::BidBook;
use crate::matching::crossing::can_match;
use crate::matching::executor::Fill;

/// Immutable view of both sides of one book
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookSnapshot {
    bids: BidBook,
    asks: AskBook,
    /// Sequence of the last applied trade, 0 before the first
    trade_sequence: u64,
}

impl BookSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// New snapshot with `order` resting on its own side
    ///
    /// The untouched side is shared with `self`.
    pub fn with_order(&self, order: Order) -> Self {
        match order.side {
            Side::BUY => Self {
                bids: self.bids.insert(order),
                asks: self.asks.clone(),
                trade_sequence: self.trade_sequence,
            },
            Side::SELL => Self {
                bids: self.bids.clone(),
                asks: self.asks.insert(order),
                trade_sequence: self.trade_sequence,
            },
        }
    }

    /// New snapshot with a fill taken from the best order on both sides
    ///
    /// The trade sequence advances by one, so the trade for this fill is
    /// numbered by the same swap that publishes it.
    pub fn apply_fill(&self, fill: &Fill) -> Self {
        Self {
            bids: self.bids.with_best_remaining(fill.buy_remaining()),
            asks: self.asks.with_best_remaining(fill.sell_remaining()),
            trade_sequence: self.trade_sequence + 1,
        }
    }

    pub fn trade_sequence(&self) -> u64 {
        self.trade_sequence
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.best()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.best()
    }

    /// True if the best bid is at or above the best ask
    pub fn is_crossed(&self) -> bool {
        match (self.bids.best_price(), self.asks.best_price()) {
            (Some(bid), Some(ask)) => can_match(bid, ask),
            _ => false,
        }
    }

    /// Shares resting on both sides combined
    pub fn resting_quantity(&self) -> Quantity {
        self.bids.total_quantity() + self.asks.total_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Aggregated top-of-book levels for both sides
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.depth(levels),
            asks: self.asks.depth(levels),
        }
    }
}

/// Order book depth for market data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthSnapshot {
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}
