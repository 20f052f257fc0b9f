//! Error types for recurrence parsing, derivation, and building.

use thiserror::Error;

/// An error produced while translating recurrence descriptions.
///
/// Pure functions in this workspace fail fast with one of these variants and
/// never log or print; batch orchestration converts per-record errors into
/// skip-with-reason outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// An ordinal-weekday string did not match the
    /// `<ordinal> <weekday>` grammar.
    #[error("invalid recurrence day format: '{input}'")]
    InvalidPatternFormat {
        /// The rejected input string.
        input: String,
    },

    /// A weekday (or week position) code was outside the domain of its
    /// numbering scheme.
    #[error("invalid weekday code: '{value}'")]
    InvalidWeekdayCode {
        /// The out-of-domain number or unrecognized name.
        value: String,
    },

    /// A date string could not be parsed as a valid calendar date.
    #[error("invalid date: '{input}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The rejected input string.
        input: String,
    },

    /// A recurrence frequency other than the supported ones was requested.
    #[error("unsupported recurrence_type={value}")]
    UnsupportedRecurrenceType {
        /// The unsupported frequency value, as given.
        value: String,
    },

    /// Neither explicit position/weekday fields nor a start date were
    /// available to derive an ordinal-weekday pattern.
    #[error("no explicit week fields and no start date to derive a pattern from")]
    MissingDerivationInput,
}

/// A specialized Result type for recurrence operations.
pub type Result<T> = std::result::Result<T, RecurrenceError>;
