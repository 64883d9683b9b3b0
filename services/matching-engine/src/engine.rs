//! Market registry and order routing
//!
//! Main entry point for drivers: one lock-free book per instrument, built
//! once and never resized. Routing validates the submission, adds the order
//! to its book, and immediately runs a matching pass on that book.

use std::sync::Arc;

use tracing::{info, warn};
use types::errors::OrderError;
use types::ids::InstrumentId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderRequest, Side};
use types::trade::TradeEvent;

use crate::book::OrderBook;
use crate::config::{ConfigError, MarketConfig};
use crate::events::{LogListener, TradeListener};
use crate::metrics::StatsSnapshot;

/// Fixed registry of order books indexed by instrument id
///
/// `Market` is `Send + Sync`; share it across worker threads with `Arc`.
pub struct Market {
    books: Box<[OrderBook]>,
    listener: Arc<dyn TradeListener>,
}

impl Market {
    /// Create a market that logs trades
    pub fn new(config: MarketConfig) -> Result<Self, ConfigError> {
        Self::with_listener(config, Arc::new(LogListener))
    }

    /// Create a market that delivers trades to `listener`
    pub fn with_listener(
        config: MarketConfig,
        listener: Arc<dyn TradeListener>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let books: Box<[OrderBook]> = (0..config.instrument_count)
            .map(|index| OrderBook::new(InstrumentId::new(index as u32)))
            .collect();

        info!(instrument_count = books.len(), "Market initialized");

        Ok(Self { books, listener })
    }

    pub fn instrument_count(&self) -> usize {
        self.books.len()
    }

    /// Book for `instrument`, if it is in range
    pub fn book(&self, instrument: InstrumentId) -> Option<&OrderBook> {
        self.books.get(instrument.index())
    }

    /// Route a typed order to its book and match it
    ///
    /// Rejects out-of-range instruments and non-positive quantities or
    /// prices without touching any book. On success the trades produced by
    /// the follow-up matching pass are returned and delivered to the
    /// listener.
    pub fn route(
        &self,
        side: Side,
        instrument: InstrumentId,
        quantity: Quantity,
        price: Price,
    ) -> Result<Vec<TradeEvent>, OrderError> {
        let book = self.checked_book(i64::from(instrument.as_u32()))?;

        if quantity.is_zero() {
            return Err(Self::reject(OrderError::InvalidQuantity(0)));
        }
        if price.as_u64() == 0 {
            return Err(Self::reject(OrderError::InvalidPrice(0)));
        }

        book.add_order(Order::new(side, instrument, quantity, price));
        Ok(self.publish(book.match_orders()))
    }

    /// Validate a raw driver submission and route it
    ///
    /// Checks run in order: instrument, order type, quantity, price. The
    /// first failure is returned.
    pub fn submit(&self, request: &OrderRequest) -> Result<Vec<TradeEvent>, OrderError> {
        let book = self.checked_book(request.instrument)?;
        let side = request.side.parse::<Side>().map_err(Self::reject)?;

        let quantity = u64::try_from(request.quantity)
            .ok()
            .and_then(Quantity::try_new)
            .ok_or_else(|| Self::reject(OrderError::InvalidQuantity(request.quantity)))?;
        let price = u64::try_from(request.price)
            .ok()
            .and_then(Price::try_new)
            .ok_or_else(|| Self::reject(OrderError::InvalidPrice(request.price)))?;

        self.route(side, book.instrument(), quantity, price)
    }

    /// Run a matching pass on one book without adding an order
    pub fn run_matching_pass(
        &self,
        instrument: InstrumentId,
    ) -> Result<Vec<TradeEvent>, OrderError> {
        let book = self.checked_book(i64::from(instrument.as_u32()))?;
        Ok(self.publish(book.match_orders()))
    }

    /// Counters summed across every book
    pub fn stats(&self) -> StatsSnapshot {
        self.books.iter().map(OrderBook::stats).sum()
    }

    /// Shares resting across every book
    pub fn resting_quantity(&self) -> Quantity {
        self.books.iter().map(OrderBook::resting_quantity).sum()
    }

    fn checked_book(&self, instrument: i64) -> Result<&OrderBook, OrderError> {
        usize::try_from(instrument)
            .ok()
            .and_then(|index| self.books.get(index))
            .ok_or_else(|| {
                Self::reject(OrderError::InvalidInstrument {
                    instrument,
                    limit: self.books.len(),
                })
            })
    }

    fn publish(&self, trades: Vec<TradeEvent>) -> Vec<TradeEvent> {
        for trade in &trades {
            self.listener.on_trade(trade);
        }
        trades
    }

    fn reject(err: OrderError) -> OrderError {
        warn!(reason = err.kind(), error = %err, "Order rejected");
        err
    }
}

impl std::fmt::Debug for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Market")
            .field("instrument_count", &self.books.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChannelListener;
    use crossbeam::channel::unbounded;

    fn market() -> Market {
        Market::new(MarketConfig::with_instruments(16)).unwrap()
    }

    #[test]
    fn test_market_resting_order() {
        let market = market();
        let trades = market
            .route(Side::BUY, InstrumentId::new(3), Quantity::new(10), Price::new(100))
            .unwrap();

        assert!(trades.is_empty());
        let book = market.book(InstrumentId::new(3)).unwrap();
        assert_eq!(book.best_bid().unwrap().price, Price::new(100));
    }

    #[test]
    fn test_market_routes_to_instrument_book_only() {
        let market = market();
        market
            .route(Side::BUY, InstrumentId::new(1), Quantity::new(10), Price::new(100))
            .unwrap();
        let trades = market
            .route(Side::SELL, InstrumentId::new(2), Quantity::new(10), Price::new(100))
            .unwrap();

        assert!(trades.is_empty(), "Different instruments never match");
        assert_eq!(market.resting_quantity(), Quantity::new(20));
    }

    #[test]
    fn test_invalid_instrument_rejected() {
        let market = market();
        let err = market
            .route(Side::BUY, InstrumentId::new(16), Quantity::new(1), Price::new(1))
            .unwrap_err();

        assert_eq!(err, OrderError::InvalidInstrument { instrument: 16, limit: 16 });
        assert_eq!(market.stats().orders_added, 0);
    }

    #[test]
    fn test_submit_rejects_negative_instrument() {
        let market = market();
        let err = market.submit(&OrderRequest::new("Buy", -1, 1, 1)).unwrap_err();
        assert!(matches!(err, OrderError::InvalidInstrument { instrument: -1, .. }));
    }

    #[test]
    fn test_submit_rejects_unknown_order_type() {
        let market = market();
        let err = market.submit(&OrderRequest::new("Hold", 0, 1, 1)).unwrap_err();
        assert_eq!(err, OrderError::InvalidOrderType("Hold".to_string()));
        assert_eq!(market.resting_quantity(), Quantity::zero());
    }

    #[test]
    fn test_submit_validation_order() {
        let market = market();
        // Instrument is checked before the order type
        let err = market.submit(&OrderRequest::new("Hold", 99, 1, 1)).unwrap_err();
        assert!(matches!(err, OrderError::InvalidInstrument { .. }));
    }

    #[test]
    fn test_submit_rejects_non_positive_quantity_and_price() {
        let market = market();
        assert_eq!(
            market.submit(&OrderRequest::new("Sell", 0, 0, 10)).unwrap_err(),
            OrderError::InvalidQuantity(0)
        );
        assert_eq!(
            market.submit(&OrderRequest::new("Sell", 0, 5, -3)).unwrap_err(),
            OrderError::InvalidPrice(-3)
        );
    }

    #[test]
    fn test_route_rejects_zero_quantity_and_price() {
        let market = market();

        let err = market
            .route(Side::BUY, InstrumentId::new(2), Quantity::new(0), Price::new(100))
            .unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity(0));

        let err = market
            .route(Side::SELL, InstrumentId::new(2), Quantity::new(5), Price::new(0))
            .unwrap_err();
        assert_eq!(err, OrderError::InvalidPrice(0));

        assert_eq!(market.stats().orders_added, 0);
        assert!(market.book(InstrumentId::new(2)).unwrap().snapshot().is_empty());
    }

    #[test]
    fn test_huge_quantities_do_not_overflow_totals() {
        let market = market();
        for _ in 0..3 {
            market.submit(&OrderRequest::new("Buy", 1, i64::MAX, 10)).unwrap();
        }

        let book = market.book(InstrumentId::new(1)).unwrap();
        assert_eq!(book.depth(5).bids, vec![(Price::new(10), Quantity::new(u64::MAX))]);
        assert_eq!(market.resting_quantity(), Quantity::new(u64::MAX));
    }

    #[test]
    fn test_trades_delivered_to_listener() {
        let (tx, rx) = unbounded();
        let market = Market::with_listener(
            MarketConfig::with_instruments(8),
            Arc::new(ChannelListener::new(tx)),
        )
        .unwrap();

        market.submit(&OrderRequest::new("Buy", 5, 10, 100)).unwrap();
        let returned = market.submit(&OrderRequest::new("Sell", 5, 10, 100)).unwrap();

        let delivered: Vec<TradeEvent> = rx.try_iter().collect();
        assert_eq!(delivered, returned);
        assert_eq!(delivered.len(), 1);
    }

    #[test]
    fn test_run_matching_pass_on_quiet_book() {
        let market = market();
        market.submit(&OrderRequest::new("Buy", 4, 10, 100)).unwrap();

        let trades = market.run_matching_pass(InstrumentId::new(4)).unwrap();
        assert!(trades.is_empty());
        assert!(market.run_matching_pass(InstrumentId::new(40)).is_err());
    }

    #[test]
    fn test_market_rejects_empty_registry() {
        assert!(Market::new(MarketConfig::with_instruments(0)).is_err());
    }
}
