//! Record-level validation errors.

use thiserror::Error;

use seriesbridge_core::RecurrenceError;

/// An error found while validating or translating an external record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field is absent or empty.
    #[error("missing required field '{field}'")]
    MissingField {
        /// The missing field's name.
        field: &'static str,
    },

    /// A time string is not valid `HH:MM:SS`.
    #[error("invalid time: '{input}' (expected HH:MM:SS)")]
    InvalidTime {
        /// The rejected input string.
        input: String,
    },

    /// An event's end date-time does not follow its start date-time.
    #[error("end date-time must be after start date-time")]
    EndBeforeStart,

    /// A recurrence-level error bubbled up from the core.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

/// A specialized Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
