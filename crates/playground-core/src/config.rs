//! Configuration for the retrying invoker

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Environment variable overriding [`RetryConfig::max_retries`].
pub const ENV_MAX_RETRIES: &str = "PLAYGROUND_MAX_RETRIES";
/// Environment variable overriding [`RetryConfig::initial_sleep_time`].
pub const ENV_INITIAL_SLEEP_TIME: &str = "PLAYGROUND_INITIAL_SLEEP_TIME";
/// Environment variable overriding [`RetryConfig::backoff_factor`].
pub const ENV_BACKOFF_FACTOR: &str = "PLAYGROUND_BACKOFF_FACTOR";

const DEFAULT_MAX_RETRIES: u32 = 20;
const DEFAULT_INITIAL_SLEEP_TIME: f64 = 1.0;
const DEFAULT_BACKOFF_FACTOR: f64 = 1.5;

/// The three knobs of the rate-limit retry policy.
///
/// Every field is optional when deserializing; missing keys take the
/// defaults (`20` attempts, `1.0` second, `1.5`x growth).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts before giving up
    pub max_retries: u32,

    /// Starting delay in seconds, multiplied by `backoff_factor` before each wait
    pub initial_sleep_time: f64,

    /// Growth factor applied to the delay after every rate-limited attempt
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_sleep_time: DEFAULT_INITIAL_SLEEP_TIME,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryConfig {
    /// Load configuration from environment variables.
    ///
    /// Starts from the defaults and applies, when set:
    /// - `PLAYGROUND_MAX_RETRIES`
    /// - `PLAYGROUND_INITIAL_SLEEP_TIME` (seconds)
    /// - `PLAYGROUND_BACKOFF_FACTOR`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(max_retries) = parse_env(ENV_MAX_RETRIES)? {
            config.max_retries = max_retries;
        }
        if let Some(initial_sleep_time) = parse_env(ENV_INITIAL_SLEEP_TIME)? {
            config.initial_sleep_time = initial_sleep_time;
        }
        if let Some(backoff_factor) = parse_env(ENV_BACKOFF_FACTOR)? {
            config.backoff_factor = backoff_factor;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML table containing any subset of the three settings.
    ///
    /// ```
    /// use playground_core::config::RetryConfig;
    ///
    /// let config = RetryConfig::from_toml_str("max_retries = 5").unwrap();
    /// assert_eq!(config.max_retries, 5);
    /// assert_eq!(config.backoff_factor, 1.5);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the delay and multiplier can drive a backoff loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("initial_sleep_time", self.initial_sleep_time)?;
        check_non_negative("backoff_factor", self.backoff_factor)
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn parse_env<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value: raw }),
        Err(_) => Ok(None),
    }
}
