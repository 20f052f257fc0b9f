//! Core recurrence types: weekdays, ordinal patterns, end conditions

pub mod derive;
pub mod error;
pub mod pattern;
pub mod rule;
pub mod tracing;
pub mod weekday;

pub use derive::{days_in_month, derive_pattern};
pub use error::{RecurrenceError, Result};
pub use pattern::{OrdinalWeekday, Position};
pub use rule::{EndCondition, RecurrenceRule, parse_date};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use weekday::{ALL_WEEKDAYS, Weekday};
