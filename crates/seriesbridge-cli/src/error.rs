//! CLI error types.

use thiserror::Error;

use seriesbridge_core::RecurrenceError;
use seriesbridge_providers::ApiError;
use seriesbridge_schemas::RecordError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A record failed validation.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A recurrence field failed to parse.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}
