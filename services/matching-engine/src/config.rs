//! Market configuration

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Instrument count used by the reference deployment
pub const DEFAULT_INSTRUMENT_COUNT: usize = 1024;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("instrument_count must be in 1..={max}, got {actual}")]
    InstrumentCount { actual: usize, max: usize },
}

/// Configuration for the market registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Number of order books; instrument ids are `0..instrument_count`.
    pub instrument_count: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            instrument_count: DEFAULT_INSTRUMENT_COUNT,
        }
    }
}

impl MarketConfig {
    pub fn with_instruments(instrument_count: usize) -> Self {
        Self { instrument_count }
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = u32::MAX as usize;
        if self.instrument_count == 0 || self.instrument_count > max {
            return Err(ConfigError::InstrumentCount {
                actual: self.instrument_count,
                max,
            });
        }
        Ok(())
    }
}
