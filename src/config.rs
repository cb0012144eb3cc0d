//! Environment-backed runtime configuration

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("saturation point {0} outside [0, 1]")]
    SaturationOutOfRange(f64),
}

/// Deployment environment name, defaulting to `sandbox`
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Runtime settings for the demo binary.
///
/// Defaults mirror the standard setup: BTC-USD over 5 days of 30-minute
/// candles, saturation point 0.5, seed 0.
#[derive(Debug, Clone)]
pub struct Config {
    pub symbol: String,
    pub period: String,
    pub interval: String,
    pub saturation_point: f64,
    pub kmeans_seed: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let saturation_point = parse_env("SATURATION_POINT", 0.5)?;
        if !(0.0..=1.0).contains(&saturation_point) {
            return Err(ConfigError::SaturationOutOfRange(saturation_point));
        }

        Ok(Self {
            symbol: env::var("SYMBOL").unwrap_or_else(|_| "BTC-USD".to_string()),
            period: env::var("PERIOD").unwrap_or_else(|_| "5d".to_string()),
            interval: env::var("INTERVAL").unwrap_or_else(|_| "30m".to_string()),
            saturation_point,
            kmeans_seed: parse_env("KMEANS_SEED", 0)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: "BTC-USD".to_string(),
            period: "5d".to_string(),
            interval: "30m".to_string(),
            saturation_point: 0.5,
            kmeans_seed: 0,
        }
    }
}

fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(default),
    }
}
