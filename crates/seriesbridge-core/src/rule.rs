//! Normalized recurrence rules and end conditions.
//!
//! A [`RecurrenceRule`] is the single source of truth fed to every payload
//! builder: constructed fresh per source record, consumed by exactly one
//! builder, never mutated afterwards and never shared across records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, Result};
use crate::pattern::OrdinalWeekday;

/// When a recurring series stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EndCondition {
    /// The series never ends.
    Never,
    /// The series ends on a fixed date (inclusive).
    OnDate(NaiveDate),
    /// The series ends after a number of occurrences.
    AfterOccurrences(u32),
}

impl EndCondition {
    /// Resolves an end condition from the optional fields of a source record.
    ///
    /// Precedence: an explicit end date wins over an occurrence count;
    /// absence of both means the series never ends. How "never" is
    /// represented on the wire is a per-schema decision made by the builders.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidDate`] when `end_date` is present
    /// but not a valid `YYYY-MM-DD` date.
    pub fn resolve(end_date: Option<&str>, occurrences: Option<u32>) -> Result<Self> {
        if let Some(raw) = end_date {
            let date = parse_date(raw)?;
            return Ok(Self::OnDate(date));
        }
        if let Some(n) = occurrences {
            return Ok(Self::AfterOccurrences(n));
        }
        Ok(Self::Never)
    }

    /// Returns the end date, if this condition is date-bound.
    pub fn on_date(&self) -> Option<NaiveDate> {
        match self {
            Self::OnDate(date) => Some(*date),
            _ => None,
        }
    }
}

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| RecurrenceError::InvalidDate {
        input: input.to_string(),
    })
}

/// A normalized monthly recurrence rule.
///
/// Monthly is the only frequency that cross-maps between the two external
/// systems; daily and weekly definitions stay within the meeting platform's
/// own schema and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// The ordinal-weekday pattern the series repeats on.
    pub pattern: OrdinalWeekday,
    /// When the series stops.
    pub end: EndCondition,
    /// Repeat every `interval` months (>= 1).
    pub interval: u32,
    /// Whether every occurrence keeps the start occurrence's time of day.
    pub same_time: bool,
}

impl RecurrenceRule {
    /// Creates a monthly rule with the default interval (1) and same-time
    /// behavior.
    pub fn monthly(pattern: OrdinalWeekday, end: EndCondition) -> Self {
        Self {
            pattern,
            end,
            interval: 1,
            same_time: true,
        }
    }

    /// Sets the repeat interval in months.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }
}
