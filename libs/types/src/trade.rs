//! Trade events
//!
//! A trade is reported with both quoted prices. No single execution price is
//! derived; consumers that want maker-price semantics can use `sell_price`
//! or `buy_price` depending on which order was resting.

use crate::ids::{InstrumentId, TradeId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One applied matching step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub trade_id: TradeId,
    /// Per-book trade sequence, in publish order starting at 1
    pub sequence: u64,
    pub instrument: InstrumentId,
    pub buy_price: Price,
    pub sell_price: Price,
    pub matched_quantity: Quantity,
    /// Unix nanos
    pub executed_at: i64,
}

impl TradeEvent {
    pub fn new(
        sequence: u64,
        instrument: InstrumentId,
        buy_price: Price,
        sell_price: Price,
        matched_quantity: Quantity,
        executed_at: i64,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            sequence,
            instrument,
            buy_price,
            sell_price,
            matched_quantity,
            executed_at,
        }
    }

    /// Stamp a trade with the current wall clock
    pub fn now(
        sequence: u64,
        instrument: InstrumentId,
        buy_price: Price,
        sell_price: Price,
        matched_quantity: Quantity,
    ) -> Self {
        let executed_at = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::new(sequence, instrument, buy_price, sell_price, matched_quantity, executed_at)
    }
}
