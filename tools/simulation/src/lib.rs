//! Order flow simulation for the lock-free order books
//!
//! Drives a [`matching_engine::Market`] the way an exchange front end would:
//! several worker threads submit random limit orders concurrently while the
//! books match them. Used by the `simulate` binary and by stress tests.
//!
//! # Modules
//! - `generator`: Seeded random order requests
//! - `driver`: Multi-threaded submission loop and run report

pub mod generator;
pub mod driver;
