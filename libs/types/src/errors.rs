//! Error types for order submission
//!
//! Every variant is recoverable: a rejected order has no effect on any book.

use thiserror::Error;

/// Reasons an order submission is rejected before reaching a book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid instrument: {instrument} (valid range 0..{limit})")]
    InvalidInstrument { instrument: i64, limit: usize },

    #[error("Invalid order type: {0}")]
    InvalidOrderType(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Invalid price: {0}")]
    InvalidPrice(i64),
}

impl OrderError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::InvalidInstrument { .. } => "invalid_instrument",
            OrderError::InvalidOrderType(_) => "invalid_order_type",
            OrderError::InvalidQuantity(_) => "invalid_quantity",
            OrderError::InvalidPrice(_) => "invalid_price",
        }
    }
}
