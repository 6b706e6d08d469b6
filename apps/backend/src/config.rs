//! Service configuration read from environment variables.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use vocab_core::types::{
    SmartOptions, DEFAULT_MIN_CONFIDENCE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SMART_MAX_ITEMS,
};

/// Default delay used to coalesce rapid detection requests.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration for the backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Delay before a submitted detection job actually runs.
    pub debounce: Duration,
    /// Default percentage for the similar-duplicate pass.
    pub similarity_threshold: f64,
    /// Defaults for the pairwise smart pass.
    pub smart: SmartOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            smart: SmartOptions {
                min_confidence: DEFAULT_MIN_CONFIDENCE,
                max_items: DEFAULT_SMART_MAX_ITEMS,
            },
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let similarity_threshold = percentage_or(
            &lookup,
            "DEDUP_SIMILARITY_THRESHOLD",
            defaults.similarity_threshold,
        )?;
        let min_confidence = percentage_or(
            &lookup,
            "DEDUP_SMART_MIN_CONFIDENCE",
            defaults.smart.min_confidence,
        )?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            debounce: Duration::from_millis(parse_or(
                &lookup,
                "DEDUP_DEBOUNCE_MS",
                DEFAULT_DEBOUNCE_MS,
            )?),
            similarity_threshold,
            smart: SmartOptions {
                min_confidence,
                max_items: parse_or(&lookup, "DEDUP_SMART_MAX_ITEMS", defaults.smart.max_items)?,
            },
        })
    }

    /// Socket address string to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn percentage_or<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, key, default)?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
    }
}
