//! Ordinal-weekday patterns ("first Monday", "last Friday").
//!
//! An [`OrdinalWeekday`] identifies one recurring day per month: a
//! [`Position`] (first through fourth, or last) combined with a [`Weekday`].
//! Parsing accepts exactly the `<ordinal> <weekday>` grammar used by the
//! calendar plugin's configuration, case-insensitively.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, Result};
use crate::weekday::Weekday;

/// Regex for the ordinal-weekday grammar. Anchored: no partial matches and no
/// extra leading or trailing tokens.
static PATTERN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(first|second|third|fourth|last)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)$",
    )
    .expect("Invalid ordinal-weekday regex")
});

/// The position of a weekday within its month.
///
/// `Last` is date-dependent, not a fixed ordinal: it means "no occurrence of
/// the same weekday follows within the month", not "the fifth occurrence".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Position {
    /// Returns the signed numeric encoding (1-4, -1 for last) shared by both
    /// external schemas.
    pub fn as_number(&self) -> i8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Last => -1,
        }
    }

    /// Parses the signed numeric encoding (1-4, -1 for last).
    pub fn from_number(n: i8) -> Result<Self> {
        match n {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            -1 => Ok(Self::Last),
            other => Err(RecurrenceError::InvalidWeekdayCode {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the lowercase ordinal word ("first", "last").
    pub fn word(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Last => "last",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "first" => Some(Self::First),
            "second" => Some(Self::Second),
            "third" => Some(Self::Third),
            "fourth" => Some(Self::Fourth),
            "last" => Some(Self::Last),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// An ordinal-weekday pattern: one recurring day per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrdinalWeekday {
    /// Which occurrence within the month.
    pub position: Position,
    /// Which day of the week.
    pub weekday: Weekday,
}

impl OrdinalWeekday {
    /// Creates a pattern from its parts.
    pub fn new(position: Position, weekday: Weekday) -> Self {
        Self { position, weekday }
    }

    /// Parses a pattern string such as `"first Monday"` or `"LAST friday"`.
    ///
    /// Surrounding whitespace is trimmed and internal whitespace runs are
    /// collapsed before matching; the grammar itself is matched exactly.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidPatternFormat`] when the input does
    /// not match `<ordinal> <weekday>`.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.split_whitespace().collect::<Vec<_>>().join(" ");
        let captures =
            PATTERN_REGEX
                .captures(&normalized)
                .ok_or_else(|| RecurrenceError::InvalidPatternFormat {
                    input: input.to_string(),
                })?;

        let position = Position::from_word(&captures[1]).ok_or_else(|| {
            RecurrenceError::InvalidPatternFormat {
                input: input.to_string(),
            }
        })?;
        let weekday =
            Weekday::from_name(&captures[2]).map_err(|_| RecurrenceError::InvalidPatternFormat {
                input: input.to_string(),
            })?;

        Ok(Self { position, weekday })
    }
}

impl fmt::Display for OrdinalWeekday {
    /// Renders the lowercase form used on the wire: `"first monday"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position.word(), self.weekday.name_lower())
    }
}

impl FromStr for OrdinalWeekday {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::ALL_WEEKDAYS;

    mod position {
        use super::*;

        #[test]
        fn number_roundtrip() {
            for pos in [
                Position::First,
                Position::Second,
                Position::Third,
                Position::Fourth,
                Position::Last,
            ] {
                assert_eq!(Position::from_number(pos.as_number()).unwrap(), pos);
            }
        }

        #[test]
        fn invalid_numbers_rejected() {
            for n in [0i8, 5, -2] {
                assert!(Position::from_number(n).is_err());
            }
        }

        #[test]
        fn last_is_negative_one() {
            assert_eq!(Position::Last.as_number(), -1);
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn basic() {
            let pattern = OrdinalWeekday::parse("first Monday").unwrap();
            assert_eq!(pattern.position, Position::First);
            assert_eq!(pattern.weekday, Weekday::Monday);

            let pattern = OrdinalWeekday::parse("last Friday").unwrap();
            assert_eq!(pattern.position, Position::Last);
            assert_eq!(pattern.weekday, Weekday::Friday);
        }

        #[test]
        fn case_insensitive() {
            let pattern = OrdinalWeekday::parse("FIRST monday").unwrap();
            assert_eq!(pattern.position, Position::First);
            assert_eq!(pattern.weekday, Weekday::Monday);

            let pattern = OrdinalWeekday::parse("ThIrD WeDnEsDaY").unwrap();
            assert_eq!(pattern.position, Position::Third);
            assert_eq!(pattern.weekday, Weekday::Wednesday);
        }

        #[test]
        fn whitespace_normalized() {
            let pattern = OrdinalWeekday::parse("  second   Tuesday ").unwrap();
            assert_eq!(pattern.position, Position::Second);
            assert_eq!(pattern.weekday, Weekday::Tuesday);
        }

        #[test]
        fn missing_separator_rejected() {
            let err = OrdinalWeekday::parse("firstmonday").unwrap_err();
            assert_eq!(
                err,
                RecurrenceError::InvalidPatternFormat {
                    input: "firstmonday".to_string()
                }
            );
        }

        #[test]
        fn unknown_ordinal_rejected() {
            assert!(OrdinalWeekday::parse("zeroth Monday").is_err());
            assert!(OrdinalWeekday::parse("fifth Monday").is_err());
        }

        #[test]
        fn extra_tokens_rejected() {
            assert!(OrdinalWeekday::parse("first Monday of the month").is_err());
            assert!(OrdinalWeekday::parse("every first Monday").is_err());
        }

        #[test]
        fn empty_rejected() {
            assert!(OrdinalWeekday::parse("").is_err());
            assert!(OrdinalWeekday::parse("   ").is_err());
        }

        #[test]
        fn from_str_impl() {
            let pattern: OrdinalWeekday = "fourth Thursday".parse().unwrap();
            assert_eq!(pattern.position, Position::Fourth);
            assert_eq!(pattern.weekday, Weekday::Thursday);
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn lowercase_display() {
            let pattern = OrdinalWeekday::new(Position::First, Weekday::Monday);
            assert_eq!(pattern.to_string(), "first monday");

            let pattern = OrdinalWeekday::new(Position::Last, Weekday::Saturday);
            assert_eq!(pattern.to_string(), "last saturday");
        }

        #[test]
        fn parse_format_roundtrip() {
            for position in [
                Position::First,
                Position::Second,
                Position::Third,
                Position::Fourth,
                Position::Last,
            ] {
                for weekday in ALL_WEEKDAYS {
                    let pattern = OrdinalWeekday::new(position, weekday);
                    let parsed = OrdinalWeekday::parse(&pattern.to_string()).unwrap();
                    assert_eq!(parsed, pattern);
                }
            }
        }
    }
}
