//! Integer price and quantity types
//!
//! Prices are whole ticks per share and quantities whole shares. Keeping
//! both integral makes matching arithmetic exact and trivially deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Limit price per share, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Create a price, returning None for zero (orders must quote a positive price)
    pub fn try_new(ticks: u64) -> Option<Self> {
        if ticks == 0 {
            None
        } else {
            Some(Self(ticks))
        }
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Share count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const fn new(shares: u64) -> Self {
        Self(shares)
    }

    /// Create a quantity, returning None for zero
    pub fn try_new(shares: u64) -> Option<Self> {
        if shares == 0 {
            None
        } else {
            Some(Self(shares))
        }
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Subtract a fill, returning None if the fill exceeds what is left
    pub fn checked_sub(self, fill: Quantity) -> Option<Quantity> {
        self.0.checked_sub(fill.0).map(Quantity)
    }
}

/// Aggregates saturate at `u64::MAX`; a single order never exceeds it
impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Quantity {
        iter.fold(Quantity::zero(), Add::add)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
