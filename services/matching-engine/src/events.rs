//! Trade event delivery
//!
//! The market hands every applied trade to a [`TradeListener`]. Listeners
//! run on the thread that produced the trade, inside `route`, so they must
//! be cheap and must not block.

use crossbeam::channel::Sender;
use tracing::{info, warn};
use types::trade::TradeEvent;

/// Receives trade events as they are applied
pub trait TradeListener: Send + Sync {
    fn on_trade(&self, trade: &TradeEvent);
}

/// Logs each trade as a structured `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl TradeListener for LogListener {
    fn on_trade(&self, trade: &TradeEvent) {
        info!(
            instrument = %trade.instrument,
            sequence = trade.sequence,
            buy_price = %trade.buy_price,
            sell_price = %trade.sell_price,
            quantity = %trade.matched_quantity,
            "Matched"
        );
    }
}

/// Forwards trades into a crossbeam channel
///
/// A disconnected receiver drops the event; matching never fails because
/// nobody is listening.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: Sender<TradeEvent>,
}

impl ChannelListener {
    pub fn new(sender: Sender<TradeEvent>) -> Self {
        Self { sender }
    }
}

impl TradeListener for ChannelListener {
    fn on_trade(&self, trade: &TradeEvent) {
        if self.sender.send(trade.clone()).is_err() {
            warn!(
                instrument = %trade.instrument,
                sequence = trade.sequence,
                "Trade receiver disconnected, dropping event"
            );
        }
    }
}

/// Discards trades
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl TradeListener for NoopListener {
    fn on_trade(&self, _trade: &TradeEvent) {}
}
