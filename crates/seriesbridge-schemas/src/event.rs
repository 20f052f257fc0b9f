//! Calendar-plugin event record shapes.
//!
//! [`EventRecord`] is the configuration shape for one event series;
//! [`EventPayload`] is the wire shape POSTed to the plugin's REST endpoint.
//! Overridable fields (`status`, `timezone`) resolve through an explicit
//! three-tier chain: event-level value, then global config value, then a
//! hard-coded default.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};
use crate::meeting::parse_time;
use crate::tribe::TribeRulePayload;

use seriesbridge_core::parse_date;

/// Default event status when neither the event nor the global config sets one.
pub const DEFAULT_STATUS: &str = "draft";

/// Default timezone when neither the event nor the global config sets one.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// One event definition from the events configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    /// Event title.
    pub title: String,
    /// Event description (may contain HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// First occurrence date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Series end date (recurring) or same-day end date, `YYYY-MM-DD`.
    pub end_date: String,
    /// Start time, `HH:MM:SS`.
    pub start_time: String,
    /// End time, `HH:MM:SS`.
    pub end_time: String,
    /// Recurrence frequency label; `MONTHLY` is the supported value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
    /// Ordinal-weekday pattern string, e.g. `"first Monday"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_day: Option<String>,
    /// Venue name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Organizer name or email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// Category names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// IANA timezone string, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Post status (`draft` or `publish`); overrides the global value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the event is all-day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
}

impl EventRecord {
    /// Validates required fields and date/time well-formedness, including
    /// that the end date-time follows the start date-time.
    pub fn validate(&self) -> RecordResult<()> {
        if self.title.is_empty() {
            return Err(RecordError::MissingField { field: "title" });
        }
        for (field, value) in [
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("start_time", &self.start_time),
            ("end_time", &self.end_time),
        ] {
            if value.is_empty() {
                return Err(RecordError::MissingField { field });
            }
        }

        let start = parse_date(&self.start_date)?.and_time(parse_time(&self.start_time)?);
        let end = parse_date(&self.end_date)?.and_time(parse_time(&self.end_time)?);
        if end <= start {
            return Err(RecordError::EndBeforeStart);
        }
        Ok(())
    }
}

/// Computes an end time from a start time plus a duration in minutes.
///
/// Wraps within the day, matching the source systems' time-of-day fields.
pub fn compute_end_time(start_time: &str, duration_minutes: u32) -> RecordResult<String> {
    let start = parse_time(start_time)?;
    let end = start + Duration::minutes(i64::from(duration_minutes));
    Ok(end.format("%H:%M:%S").to_string())
}

/// Resolves an overridable field through the three-tier chain:
/// record value, else global config value, else the hard-coded default.
pub fn resolve_field<'a>(
    record: Option<&'a str>,
    global: Option<&'a str>,
    default: &'a str,
) -> &'a str {
    record.or(global).unwrap_or(default)
}

/// Global defaults applied when building event payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDefaults {
    /// Config-level post status.
    pub status: Option<String>,
    /// Config-level timezone.
    pub timezone: Option<String>,
}

/// Venue wrapper object required by the plugin's REST schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueField {
    /// The venue name.
    pub venue: String,
}

/// Organizer wrapper object required by the plugin's REST schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerField {
    /// The organizer name or email.
    pub organizer: String,
}

/// The wire payload POSTed to the calendar plugin's events endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Post status.
    pub status: String,
    /// Combined `YYYY-MM-DD HH:MM:SS` start.
    pub start_date: String,
    /// Combined `YYYY-MM-DD HH:MM:SS` end (same day as the start for
    /// recurring series; the series end lives in the recurrence rules).
    pub end_date: String,
    /// Whether the event is all-day.
    pub all_day: bool,
    /// IANA timezone string.
    pub timezone: String,
    /// Venue, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<VenueField>,
    /// Organizer, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<OrganizerField>,
    /// Category names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Recurrence rules, when the event recurs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<TribeRulePayload>,
}

impl EventPayload {
    /// Builds the wire payload for one event record.
    ///
    /// `recurrence` carries the already-built rule payload for recurring
    /// series, or `None` for single events. Both occurrence bounds use the
    /// start date: for recurring events the series end is expressed inside
    /// the recurrence rules, not in `end_date`.
    pub fn build(
        record: &EventRecord,
        defaults: &EventDefaults,
        recurrence: Option<TribeRulePayload>,
    ) -> Self {
        let status = resolve_field(
            record.status.as_deref(),
            defaults.status.as_deref(),
            DEFAULT_STATUS,
        );
        let timezone = resolve_field(
            record.timezone.as_deref(),
            defaults.timezone.as_deref(),
            DEFAULT_TIMEZONE,
        );

        Self {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            status: status.to_string(),
            start_date: format!("{} {}", record.start_date, record.start_time),
            end_date: format!("{} {}", record.start_date, record.end_time),
            all_day: record.all_day.unwrap_or(false),
            timezone: timezone.to_string(),
            venue: record.venue.clone().map(|venue| VenueField { venue }),
            organizer: record
                .organizer
                .clone()
                .map(|organizer| OrganizerField { organizer }),
            categories: record.categories.clone(),
            recurrence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> EventRecord {
        EventRecord {
            title: "Cluster Meeting".to_string(),
            description: Some("Monthly community call".to_string()),
            start_date: "2026-03-02".to_string(),
            end_date: "2026-12-31".to_string(),
            start_time: "14:00:00".to_string(),
            end_time: "15:00:00".to_string(),
            venue: Some("Virtual".to_string()),
            organizer: Some("ESIP".to_string()),
            categories: vec!["Collaboration Area".to_string()],
            ..Default::default()
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_complete_record() {
            assert!(valid_record().validate().is_ok());
        }

        #[test]
        fn rejects_missing_title() {
            let record = EventRecord {
                title: String::new(),
                ..valid_record()
            };
            assert_eq!(
                record.validate().unwrap_err(),
                RecordError::MissingField { field: "title" }
            );
        }

        #[test]
        fn rejects_end_before_start() {
            let record = EventRecord {
                end_date: "2026-03-02".to_string(),
                end_time: "13:00:00".to_string(),
                ..valid_record()
            };
            assert_eq!(record.validate().unwrap_err(), RecordError::EndBeforeStart);
        }

        #[test]
        fn rejects_equal_start_and_end() {
            let record = EventRecord {
                end_date: "2026-03-02".to_string(),
                end_time: "14:00:00".to_string(),
                ..valid_record()
            };
            assert_eq!(record.validate().unwrap_err(), RecordError::EndBeforeStart);
        }

        #[test]
        fn rejects_malformed_dates() {
            let record = EventRecord {
                start_date: "March 2, 2026".to_string(),
                ..valid_record()
            };
            assert!(record.validate().is_err());
        }
    }

    mod end_time {
        use super::*;

        #[test]
        fn adds_duration() {
            assert_eq!(compute_end_time("14:00:00", 60).unwrap(), "15:00:00");
            assert_eq!(compute_end_time("14:00:00", 90).unwrap(), "15:30:00");
        }

        #[test]
        fn wraps_within_day() {
            assert_eq!(compute_end_time("23:30:00", 60).unwrap(), "00:30:00");
        }

        #[test]
        fn rejects_bad_time() {
            assert!(compute_end_time("2pm", 60).is_err());
        }
    }

    mod field_resolution {
        use super::*;

        #[test]
        fn record_wins() {
            assert_eq!(
                resolve_field(Some("publish"), Some("draft"), DEFAULT_STATUS),
                "publish"
            );
        }

        #[test]
        fn global_when_no_record_value() {
            assert_eq!(
                resolve_field(None, Some("publish"), DEFAULT_STATUS),
                "publish"
            );
        }

        #[test]
        fn default_when_neither() {
            assert_eq!(resolve_field(None, None, DEFAULT_STATUS), "draft");
            assert_eq!(resolve_field(None, None, DEFAULT_TIMEZONE), "America/New_York");
        }
    }

    mod payload {
        use super::*;

        #[test]
        fn combines_date_and_time() {
            let payload = EventPayload::build(&valid_record(), &EventDefaults::default(), None);
            assert_eq!(payload.start_date, "2026-03-02 14:00:00");
            assert_eq!(payload.end_date, "2026-03-02 15:00:00");
            assert_eq!(payload.status, "draft");
            assert_eq!(payload.timezone, "America/New_York");
            assert!(!payload.all_day);
        }

        #[test]
        fn wraps_venue_and_organizer() {
            let payload = EventPayload::build(&valid_record(), &EventDefaults::default(), None);
            assert_eq!(payload.venue.unwrap().venue, "Virtual");
            assert_eq!(payload.organizer.unwrap().organizer, "ESIP");
        }

        #[test]
        fn omits_unset_optionals_from_json() {
            let record = EventRecord {
                venue: None,
                organizer: None,
                categories: Vec::new(),
                ..valid_record()
            };
            let payload = EventPayload::build(&record, &EventDefaults::default(), None);
            let json = serde_json::to_value(&payload).unwrap();
            let object = json.as_object().unwrap();
            assert!(!object.contains_key("venue"));
            assert!(!object.contains_key("organizer"));
            assert!(!object.contains_key("categories"));
            assert!(!object.contains_key("recurrence"));
        }

        #[test]
        fn applies_global_defaults() {
            let defaults = EventDefaults {
                status: Some("publish".to_string()),
                timezone: Some("UTC".to_string()),
            };
            let payload = EventPayload::build(&valid_record(), &defaults, None);
            assert_eq!(payload.status, "publish");
            assert_eq!(payload.timezone, "UTC");

            let record = EventRecord {
                status: Some("draft".to_string()),
                timezone: Some("Europe/Paris".to_string()),
                ..valid_record()
            };
            let payload = EventPayload::build(&record, &defaults, None);
            assert_eq!(payload.status, "draft");
            assert_eq!(payload.timezone, "Europe/Paris");
        }
    }
}
