//! Deriving an ordinal-weekday pattern from a concrete date.
//!
//! Used when a record carries only a start date and no explicit week-position
//! fields: the date's own position within its month becomes the pattern.

use chrono::{Datelike, NaiveDate};

use crate::pattern::{OrdinalWeekday, Position};
use crate::weekday::Weekday;

/// Returns the number of days in the month containing `date`.
///
/// Handles leap years through chrono's calendar arithmetic.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let first_of_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid first of month");
    first_of_next
        .pred_opt()
        .expect("valid last day of month")
        .day()
}

/// Derives the ordinal-weekday pattern a date satisfies within its month.
///
/// The week number is `((day - 1) / 7) + 1`. A date is classified `Last`
/// whenever `day + 7` exceeds the length of its month, i.e. no occurrence of
/// the same weekday follows within the month; this overrides the numeric week
/// number, so a fourth-week date in the final window derives as `Last`, as
/// does any fifth-week date.
///
/// Pure and total: never fails for a valid calendar date.
pub fn derive_pattern(date: NaiveDate) -> OrdinalWeekday {
    let weekday = Weekday::from_chrono(date.weekday());
    let day = date.day();

    let position = if day + 7 > days_in_month(date) {
        Position::Last
    } else {
        match (day - 1) / 7 + 1 {
            1 => Position::First,
            2 => Position::Second,
            3 => Position::Third,
            _ => Position::Fourth,
        }
    };

    OrdinalWeekday::new(position, weekday)
}
