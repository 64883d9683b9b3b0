//! Ask (sell-side) order sequence
//!
//! Maintains sell orders sorted by price ascending (best ask first).

use types::numeric::Price;
use types::order::Side;

use super::side::{SideOrders, SidePriority};

/// Lowest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct AskPriority;

impl SidePriority for AskPriority {
    const SIDE: Side = Side::SELL;

    fn outranks(price: Price, other: Price) -> bool {
        price < other
    }
}

/// Ask (sell) side of a book snapshot
pub type AskBook = SideOrders<AskPriority>;
