//! Weekday identity and the two external numbering schemes.
//!
//! The two external systems number weekdays differently: the meeting platform
//! uses integers with Sunday=1 through Saturday=7, while the calendar plugin
//! uses day names (matched case-insensitively). [`Weekday`] is the canonical
//! pivot; every conversion goes through it rather than integer-to-integer, so
//! the two conventions can never be confused with each other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RecurrenceError, Result};

/// A day of the week.
///
/// Declared Sunday-first to match the meeting platform's numbering, but the
/// discriminants themselves are never exposed; use the conversion methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// All seven weekdays, Sunday-first.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// Returns the meeting-platform code for this weekday (Sunday=1 .. Saturday=7).
    pub fn zoom_number(&self) -> u8 {
        match self {
            Self::Sunday => 1,
            Self::Monday => 2,
            Self::Tuesday => 3,
            Self::Wednesday => 4,
            Self::Thursday => 5,
            Self::Friday => 6,
            Self::Saturday => 7,
        }
    }

    /// Parses a meeting-platform weekday code (Sunday=1 .. Saturday=7).
    pub fn from_zoom_number(n: u8) -> Result<Self> {
        match n {
            1 => Ok(Self::Sunday),
            2 => Ok(Self::Monday),
            3 => Ok(Self::Tuesday),
            4 => Ok(Self::Wednesday),
            5 => Ok(Self::Thursday),
            6 => Ok(Self::Friday),
            7 => Ok(Self::Saturday),
            other => Err(RecurrenceError::InvalidWeekdayCode {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the capitalized English name ("Monday").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Returns the all-uppercase name used by the calendar plugin ("MONDAY").
    pub fn name_upper(&self) -> &'static str {
        match self {
            Self::Sunday => "SUNDAY",
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
        }
    }

    /// Returns the all-lowercase name ("monday").
    pub fn name_lower(&self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }

    /// Parses a weekday name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(Self::Sunday),
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            _ => Err(RecurrenceError::InvalidWeekdayCode {
                value: name.to_string(),
            }),
        }
    }

    /// Converts from a chrono weekday.
    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }

    /// Converts to a chrono weekday.
    pub fn to_chrono(&self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_number_roundtrip() {
        for day in ALL_WEEKDAYS {
            assert_eq!(Weekday::from_zoom_number(day.zoom_number()).unwrap(), day);
        }
        for n in 1..=7u8 {
            assert_eq!(Weekday::from_zoom_number(n).unwrap().zoom_number(), n);
        }
    }

    #[test]
    fn zoom_number_out_of_range() {
        for n in [0u8, 8, 42] {
            let err = Weekday::from_zoom_number(n).unwrap_err();
            assert_eq!(
                err,
                RecurrenceError::InvalidWeekdayCode {
                    value: n.to_string()
                }
            );
        }
    }

    #[test]
    fn name_roundtrip_case_insensitive() {
        for day in ALL_WEEKDAYS {
            assert_eq!(Weekday::from_name(day.name()).unwrap(), day);
            assert_eq!(Weekday::from_name(day.name_upper()).unwrap(), day);
            assert_eq!(Weekday::from_name(day.name_lower()).unwrap(), day);
        }
        assert_eq!(Weekday::from_name("  TuEsDaY ").unwrap(), Weekday::Tuesday);
    }

    #[test]
    fn unknown_name_rejected() {
        let err = Weekday::from_name("moonday").unwrap_err();
        assert_eq!(
            err,
            RecurrenceError::InvalidWeekdayCode {
                value: "moonday".to_string()
            }
        );
    }

    #[test]
    fn chrono_roundtrip() {
        for day in ALL_WEEKDAYS {
            assert_eq!(Weekday::from_chrono(day.to_chrono()), day);
        }
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Sun), Weekday::Sunday);
    }

    #[test]
    fn sunday_first_alignment() {
        // Zoom numbering is Sunday-first; chrono's num_days_from_sunday is
        // zero-based. The adapter must agree with chrono on identity.
        for day in ALL_WEEKDAYS {
            assert_eq!(
                u32::from(day.zoom_number()),
                day.to_chrono().num_days_from_sunday() + 1
            );
        }
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&Weekday::Friday).unwrap();
        assert_eq!(json, "\"friday\"");
        let parsed: Weekday = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Weekday::Friday);
    }
}
