//! Bid (buy-side) order sequence
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Equal prices keep arrival order.

use types::numeric::Price;
use types::order::Side;

use super::side::{SideOrders, SidePriority};

/// Highest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct BidPriority;

impl SidePriority for BidPriority {
    const SIDE: Side = Side::BUY;

    fn outranks(price: Price, other: Price) -> bool {
        price > other
    }
}

/// Bid (buy) side of a book snapshot
pub type BidBook = SideOrders<BidPriority>;
