use anyhow::Context;
use simulation::driver::{self, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(&path)
            .with_context(|| format!("loading simulation config from {path}"))?,
        None => SimulationConfig::default(),
    };

    tracing::info!(
        instruments = config.market.instrument_count,
        workers = config.workers,
        seed = config.generator.seed,
        "Starting order flow simulation"
    );

    let report = driver::run(&config).context("building market")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_conserved() {
        anyhow::bail!(
            "quantity not conserved: input {} != resting {} + 2 x matched {}",
            report.input_shares,
            report.resting_quantity,
            report.shares_matched
        );
    }

    Ok(())
}
