//! Concurrent order flow driver
//!
//! Spawns worker threads that share one market and submit generated
//! orders through it. Each worker tallies what it sent and what matched;
//! the tallies plus the market's own counters form the run report.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use matching_engine::config::ConfigError;
use matching_engine::metrics::StatsSnapshot;
use matching_engine::{LogListener, Market, MarketConfig, NoopListener, TradeListener};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::generator::{GeneratorConfig, OrderGenerator};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub market: MarketConfig,
    pub generator: GeneratorConfig,
    /// Number of submitting threads
    pub workers: usize,
    /// Orders each worker submits
    pub orders_per_worker: usize,
    /// Pause between a worker's submissions
    pub order_delay_ms: u64,
    /// Log every trade through `tracing`
    pub log_trades: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            generator: GeneratorConfig::default(),
            workers: 4,
            orders_per_worker: 10_000,
            order_delay_ms: 0,
            log_trades: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.market.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Per-worker counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WorkerTally {
    submitted: u64,
    rejected: u64,
    trades: u64,
    input_shares: u64,
    shares_matched: u64,
}

/// Outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub workers: usize,
    pub submitted: u64,
    pub rejected: u64,
    pub trades: u64,
    pub input_shares: u64,
    pub shares_matched: u64,
    pub resting_quantity: u64,
    pub elapsed_ms: u128,
    pub orders_per_sec: f64,
    pub stats: StatsSnapshot,
}

impl SimulationReport {
    /// Every accepted share is either resting or matched against another
    pub fn is_conserved(&self) -> bool {
        u128::from(self.input_shares)
            == u128::from(self.resting_quantity) + 2 * u128::from(self.shares_matched)
    }
}

/// Build a market from `config` and run the simulation on it.
pub fn run(config: &SimulationConfig) -> Result<SimulationReport, ConfigError> {
    let listener: Arc<dyn TradeListener> = if config.log_trades {
        Arc::new(LogListener)
    } else {
        Arc::new(NoopListener)
    };
    let market = Market::with_listener(config.market.clone(), listener)?;
    Ok(run_on(&market, config))
}

/// Run the simulation against an existing market.
pub fn run_on(market: &Market, config: &SimulationConfig) -> SimulationReport {
    info!(
        workers = config.workers,
        orders_per_worker = config.orders_per_worker,
        instruments = market.instrument_count(),
        "Starting simulation"
    );

    let started = Instant::now();

    let tallies: Vec<WorkerTally> = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.workers)
            .map(|worker| scope.spawn(move || run_worker(market, config, worker)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let elapsed = started.elapsed();
    let total = tallies.iter().fold(WorkerTally::default(), |acc, t| WorkerTally {
        submitted: acc.submitted + t.submitted,
        rejected: acc.rejected + t.rejected,
        trades: acc.trades + t.trades,
        input_shares: acc.input_shares.saturating_add(t.input_shares),
        shares_matched: acc.shares_matched.saturating_add(t.shares_matched),
    });

    let orders_per_sec = if elapsed.as_secs_f64() > 0.0 {
        total.submitted as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    let report = SimulationReport {
        workers: config.workers,
        submitted: total.submitted,
        rejected: total.rejected,
        trades: total.trades,
        input_shares: total.input_shares,
        shares_matched: total.shares_matched,
        resting_quantity: market.resting_quantity().as_u64(),
        elapsed_ms: elapsed.as_millis(),
        orders_per_sec,
        stats: market.stats(),
    };

    info!(
        submitted = report.submitted,
        rejected = report.rejected,
        trades = report.trades,
        elapsed_ms = report.elapsed_ms as u64,
        contention = report.stats.contention_ratio(),
        "Simulation finished"
    );

    report
}

fn run_worker(market: &Market, config: &SimulationConfig, worker: usize) -> WorkerTally {
    let seed = config.generator.seed.wrapping_add(worker as u64);
    let mut generator = OrderGenerator::new(config.generator.clone(), market.instrument_count(), seed);
    let delay = Duration::from_millis(config.order_delay_ms);
    let mut tally = WorkerTally::default();

    for request in generator.by_ref().take(config.orders_per_worker) {
        tally.submitted += 1;
        match market.submit(&request) {
            Ok(trades) => {
                tally.input_shares = tally.input_shares.saturating_add(request.quantity as u64);
                tally.trades += trades.len() as u64;
                tally.shares_matched = trades
                    .iter()
                    .map(|trade| trade.matched_quantity.as_u64())
                    .fold(tally.shares_matched, u64::saturating_add);
            }
            Err(_) => tally.rejected += 1,
        }

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    debug!(worker, submitted = tally.submitted, trades = tally.trades, "Worker finished");
    tally
}
