//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `EVERSHOP_DATA_DIR` - Directory for persisted session state (default: `.evershop`)
//! - `EVERSHOP_LATENCY_MS` - Base simulated backend latency in milliseconds (default: 1000)
//! - `EVERSHOP_FAILURE_INJECTION` - Whether simulated calls fail at their configured
//!   rates, `true` or `false` (default: true)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::sim::{FailureInjector, NoFailures, RandomFailures};

const DEFAULT_DATA_DIR: &str = ".evershop";
const DEFAULT_LATENCY_MS: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory persisted session state is written to.
    pub data_dir: PathBuf,
    /// Base latency for simulated backend calls. Individual flows scale
    /// it; order placement for instance runs at twice this.
    pub latency: Duration,
    /// Whether simulated calls fail at their configured rates.
    pub failure_injection: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            failure_injection: true,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("EVERSHOP_DATA_DIR", DEFAULT_DATA_DIR));
        let latency_ms: u64 = parse_env("EVERSHOP_LATENCY_MS", DEFAULT_LATENCY_MS)?;
        let failure_injection: bool = parse_env("EVERSHOP_FAILURE_INJECTION", true)?;

        Ok(Self {
            data_dir,
            latency: Duration::from_millis(latency_ms),
            failure_injection,
        })
    }

    /// The failure injector matching the configuration.
    #[must_use]
    pub fn build_injector(&self) -> Box<dyn FailureInjector> {
        if self.failure_injection {
            Box::new(RandomFailures)
        } else {
            Box::new(NoFailures)
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable, falling back to a default when
/// unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(".evershop"));
        assert_eq!(config.latency, Duration::from_millis(1000));
        assert!(config.failure_injection);
    }

    #[test]
    fn test_injector_matches_flag() {
        let mut on = StorefrontConfig {
            failure_injection: true,
            ..StorefrontConfig::default()
        }
        .build_injector();
        assert!(on.roll(1.0));

        let mut off = StorefrontConfig {
            failure_injection: false,
            ..StorefrontConfig::default()
        }
        .build_injector();
        assert!(!off.roll(1.0));
    }
}
