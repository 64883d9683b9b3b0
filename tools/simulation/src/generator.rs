//! Random order generator
//!
//! Generates order requests with a deterministic seeded RNG. The default
//! distribution matches the reference flow: side 50/50, instrument uniform
//! over the registry, quantity in 1..=100, price in 1..=1000.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use types::order::OrderRequest;

/// Configuration for the random order generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base seed; worker `n` uses `seed + n`
    pub seed: u64,
    /// Largest quantity generated
    pub max_quantity: u64,
    /// Largest price generated
    pub max_price: u64,
    /// Probability of emitting a malformed request (0.0 to 1.0)
    pub invalid_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_quantity: 100,
            max_price: 1000,
            invalid_ratio: 0.0,
        }
    }
}

/// Random order source with deterministic seeded RNG.
pub struct OrderGenerator {
    config: GeneratorConfig,
    instrument_count: usize,
    rng: ChaCha8Rng,
    pub orders_generated: usize,
}

impl OrderGenerator {
    /// Create a generator for a registry of `instrument_count` books.
    pub fn new(config: GeneratorConfig, instrument_count: usize, seed: u64) -> Self {
        Self {
            config,
            instrument_count,
            rng: ChaCha8Rng::seed_from_u64(seed),
            orders_generated: 0,
        }
    }

    /// Generate the next order request.
    pub fn next_request(&mut self) -> OrderRequest {
        self.orders_generated += 1;

        if self.config.invalid_ratio > 0.0 && self.rng.gen_bool(self.config.invalid_ratio.min(1.0)) {
            return self.malformed_request();
        }

        let side = if self.rng.gen_bool(0.5) { "Buy" } else { "Sell" };
        let instrument = self.rng.gen_range(0..self.instrument_count.max(1));
        let quantity = self.rng.gen_range(1..=bounded(self.config.max_quantity));
        let price = self.rng.gen_range(1..=bounded(self.config.max_price));

        OrderRequest::new(side, instrument as i64, quantity as i64, price as i64)
    }

    /// A request the market must reject: bad instrument or bad order type.
    fn malformed_request(&mut self) -> OrderRequest {
        if self.rng.gen_bool(0.5) {
            let instrument = self.instrument_count as i64 + self.rng.gen_range(0..1000);
            OrderRequest::new("Buy", instrument, 1, 1)
        } else {
            OrderRequest::new("Hold", 0, 1, 1)
        }
    }
}

/// Clamp a configured maximum into the range a request field can carry
fn bounded(max: u64) -> u64 {
    max.clamp(1, i64::MAX as u64)
}

impl Iterator for OrderGenerator {
    type Item = OrderRequest;

    fn next(&mut self) -> Option<OrderRequest> {
        Some(self.next_request())
    }
}
