//! CLI error type.

use thiserror::Error;

use datastore::StoreError;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A store operation in the demo scenario failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A command-line argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
