//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DATASTORE_LOG_FORMAT` - `text` or `json` (default: text)
//! - `DATASTORE_BENCH_SIZE` - Elements inserted per container (default: 200000)
//! - `DATASTORE_BENCH_LOOKUPS` - Membership lookups per container (default: 50000)
//! - `DATASTORE_BENCH_WARMUP` - Warm-up rounds before timing (default: 2)
//! - `RUST_LOG` - Tracing filter (default: `datastore=info,datastore_cli=info`)
//!
//! Command-line flags take precedence over these values.

use std::str::FromStr;

use thiserror::Error;

const DEFAULT_BENCH_SIZE: usize = 200_000;
const DEFAULT_BENCH_LOOKUPS: usize = 50_000;
const DEFAULT_BENCH_WARMUP: usize = 2;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Container benchmark parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Elements inserted into each container.
    pub size: usize,
    /// Membership lookups issued against each container.
    pub lookups: usize,
    /// Untimed rounds run first.
    pub warmup: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BENCH_SIZE,
            lookups: DEFAULT_BENCH_LOOKUPS,
            warmup: DEFAULT_BENCH_WARMUP,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub log_format: LogFormat,
    pub bench: BenchConfig,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_format = parse_or_default(&lookup, "DATASTORE_LOG_FORMAT", LogFormat::Text)?;
        let bench = BenchConfig {
            size: parse_positive(&lookup, "DATASTORE_BENCH_SIZE", DEFAULT_BENCH_SIZE)?,
            lookups: parse_positive(&lookup, "DATASTORE_BENCH_LOOKUPS", DEFAULT_BENCH_LOOKUPS)?,
            warmup: parse_or_default(&lookup, "DATASTORE_BENCH_WARMUP", DEFAULT_BENCH_WARMUP)?,
        };

        Ok(Self { log_format, bench })
    }
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize, ConfigError> {
    let value = parse_or_default(lookup, key, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}
