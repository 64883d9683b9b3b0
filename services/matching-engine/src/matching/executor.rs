//! Trade execution logic
//!
//! Finds the next fill between the best bid and best ask of a snapshot and
//! turns published fills into trade events.

use types::ids::InstrumentId;
use types::numeric::Quantity;
use types::order::Order;
use types::trade::TradeEvent;

use super::crossing::can_match;
use crate::book::BookSnapshot;

/// A single crossing between the best bid and the best ask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub buy: Order,
    pub sell: Order,
    pub quantity: Quantity,
}

impl Fill {
    /// Fill between a bid and an ask, or None if their prices do not cross
    ///
    /// The matched quantity is the smaller of the two remaining quantities.
    pub fn between(buy: Order, sell: Order) -> Option<Self> {
        if !can_match(buy.price, sell.price) {
            return None;
        }

        Some(Self {
            buy,
            sell,
            quantity: buy.quantity.min(sell.quantity),
        })
    }

    /// Shares left on the buy order after this fill
    pub fn buy_remaining(&self) -> Quantity {
        self.buy.quantity.checked_sub(self.quantity).unwrap_or_default()
    }

    /// Shares left on the sell order after this fill
    pub fn sell_remaining(&self) -> Quantity {
        self.sell.quantity.checked_sub(self.quantity).unwrap_or_default()
    }
}

/// Next fill available in `snapshot`, if the book is crossed
pub fn find_fill(snapshot: &BookSnapshot) -> Option<Fill> {
    let buy = snapshot.best_bid()?;
    let sell = snapshot.best_ask()?;
    Fill::between(*buy, *sell)
}

/// Build the trade event for a fill that has been published
///
/// `sequence` is the trade sequence of the snapshot that applied the fill.
pub fn execute(instrument: InstrumentId, sequence: u64, fill: &Fill) -> TradeEvent {
    TradeEvent::now(
        sequence,
        instrument,
        fill.buy.price,
        fill.sell.price,
        fill.quantity,
    )
}
