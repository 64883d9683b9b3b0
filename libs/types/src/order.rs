//! Order types
//!
//! `Order` is the immutable value resting in a book. `OrderRequest` is the
//! raw form a driver hands in; it only becomes an `Order` after validation.

use crate::errors::OrderError;
use crate::ids::InstrumentId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => f.write_str("Buy"),
            Side::SELL => f.write_str("Sell"),
        }
    }
}

/// Parses the driver's order type names ("Buy" / "Sell", any case)
impl FromStr for Side {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("buy") {
            Ok(Side::BUY)
        } else if s.eq_ignore_ascii_case("sell") {
            Ok(Side::SELL)
        } else {
            Err(OrderError::InvalidOrderType(s.to_string()))
        }
    }
}

/// A resting intent to trade
///
/// Orders carry no identity: two orders with equal fields are
/// interchangeable. `sequence` is the arrival stamp assigned by the book and
/// only breaks ties between equal prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub instrument: InstrumentId,
    pub quantity: Quantity,
    pub price: Price,
    pub sequence: u64,
}

impl Order {
    /// Create an order with no arrival stamp yet
    pub fn new(side: Side, instrument: InstrumentId, quantity: Quantity, price: Price) -> Self {
        Self {
            side,
            instrument,
            quantity,
            price,
            sequence: 0,
        }
    }

    /// Copy of this order stamped with an arrival sequence
    pub fn with_sequence(self, sequence: u64) -> Self {
        Self { sequence, ..self }
    }

    /// Copy of this order holding a different remaining quantity
    pub fn with_quantity(self, quantity: Quantity) -> Self {
        Self { quantity, ..self }
    }
}

/// Unvalidated order submission as produced by a driver or read from JSON
///
/// Fields are deliberately loose (string side, signed integers) so that
/// malformed input is representable and rejected by routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: String,
    pub instrument: i64,
    pub quantity: i64,
    pub price: i64,
}

impl OrderRequest {
    pub fn new(side: impl Into<String>, instrument: i64, quantity: i64, price: i64) -> Self {
        Self {
            side: side.into(),
            instrument,
            quantity,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_str() {
        assert_eq!("Buy".parse::<Side>(), Ok(Side::BUY));
        assert_eq!("SELL".parse::<Side>(), Ok(Side::SELL));
        assert_eq!(
            "Short".parse::<Side>(),
            Err(OrderError::InvalidOrderType("Short".to_string()))
        );
    }

    #[test]
    fn test_order_copies_are_independent() {
        let order = Order::new(Side::BUY, InstrumentId::new(5), Quantity::new(10), Price::new(100));
        let stamped = order.with_sequence(42);
        let reduced = stamped.with_quantity(Quantity::new(4));

        assert_eq!(order.sequence, 0);
        assert_eq!(stamped.sequence, 42);
        assert_eq!(stamped.quantity, Quantity::new(10));
        assert_eq!(reduced.quantity, Quantity::new(4));
        assert_eq!(reduced.price, Price::new(100));
    }

    #[test]
    fn test_order_request_deserialization() {
        let json = r#"{"side":"Sell","instrument":9,"quantity":25,"price":310}"#;
        let request: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, OrderRequest::new("Sell", 9, 25, 310));
    }

    #[test]
    fn test_order_serialization() {
        let order = Order::new(Side::SELL, InstrumentId::new(3), Quantity::new(7), Price::new(250));
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
        assert!(json.contains("\"SELL\""));
    }
}
