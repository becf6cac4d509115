//! Error types for kumo.

use thiserror::Error;

use crate::IntervalParseError;

/// Result type alias for kumo operations.
pub type Result<T> = std::result::Result<T, KumoError>;

/// Errors that can occur while configuring or feeding the pipeline.
#[derive(Error, Debug)]
pub enum KumoError {
    /// Interval identifier could not be parsed.
    #[error(transparent)]
    Interval(#[from] IntervalParseError),

    /// Configuration is present but invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
