//! Error types for the CLI.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The pricing engine rejected the inputs
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A batch input line could not be used
    #[error("Invalid batch request on line {line}: {reason}")]
    BatchLine {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
