//! Matching logic module
//!
//! Implements price-priority crossing with partial fills

pub mod crossing;
pub mod executor;

pub use crossing::can_match;
pub use executor::{execute, find_fill, Fill};
