//! Meeting-platform (Zoom) record shapes.
//!
//! [`MeetingRecord`] is the read-only input shape from a meetings
//! configuration file. The translation core only interprets the date, time,
//! duration, and recurrence fields; everything else passes through to the
//! meeting payload untouched.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use seriesbridge_core::parse_date;

use crate::error::{RecordError, RecordResult};

/// Default meeting duration in minutes when a record does not set one.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// One meeting definition from the meetings configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingRecord {
    /// Meeting title.
    pub topic: String,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Start time, `HH:MM:SS`.
    pub start_time: String,
    /// Duration in minutes; defaults to 60.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// IANA timezone string, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Recurrence frequency: `daily`, `weekly`, or `monthly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<String>,
    /// Repeat every N days/weeks/months; defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<u32>,
    /// Weekly: comma-separated weekday codes, Sunday=1 .. Saturday=7.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_days: Option<String>,
    /// Monthly: fixed day of month (1-31).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_day: Option<u32>,
    /// Monthly: week position (1-4, -1 for last).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_week: Option<i8>,
    /// Monthly: weekday code (Sunday=1 .. Saturday=7).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_week_day: Option<u8>,
    /// Series end date, `YYYY-MM-DD`. Wins over `occurrences`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Number of occurrences before the series ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
    /// Email of the hosting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    /// Meeting agenda text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    /// Meeting passcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether attendee registration is enabled; defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_registration: Option<bool>,
    /// Host video on join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_video: Option<bool>,
    /// Participant video on join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_video: Option<bool>,
    /// Allow joining before the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_before_host: Option<bool>,
    /// Mute participants on entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute_upon_entry: Option<bool>,
    /// Add a watermark to shared content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
    /// Registration approval type: 0 auto, 1 manual, 2 none required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_type: Option<u8>,
    /// Registration type: 1 once for all occurrences, 2 per occurrence,
    /// 3 once for one occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<u8>,
    /// Audio mode: `both`, `telephony`, or `voip`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Automatic recording: `none`, `local`, or `cloud`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_recording: Option<String>,
    /// Hold participants in a waiting room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_room: Option<bool>,
    /// Require authentication to join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_authentication: Option<bool>,
}

impl MeetingRecord {
    /// Returns the duration in minutes, applying the default.
    pub fn duration_minutes(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// Parses the record's start date.
    pub fn parsed_start_date(&self) -> RecordResult<NaiveDate> {
        Ok(parse_date(&self.start_date)?)
    }

    /// Returns the combined `YYYY-MM-DDTHH:MM:SS` start field used by the
    /// meeting payload.
    pub fn start_datetime_field(&self) -> String {
        format!("{}T{}", self.start_date, self.start_time)
    }

    /// Validates the fields a meeting record must carry before it can be
    /// submitted: host email, topic, and well-formed date/time strings.
    pub fn validate(&self) -> RecordResult<()> {
        if self.host_email.as_deref().unwrap_or("").is_empty() {
            return Err(RecordError::MissingField { field: "host_email" });
        }
        if self.topic.is_empty() {
            return Err(RecordError::MissingField { field: "topic" });
        }
        if self.start_date.is_empty() {
            return Err(RecordError::MissingField { field: "start_date" });
        }
        if self.start_time.is_empty() {
            return Err(RecordError::MissingField { field: "start_time" });
        }
        parse_date(&self.start_date)?;
        parse_time(&self.start_time)?;
        if let Some(ref end) = self.end_date {
            parse_date(end)?;
        }
        Ok(())
    }
}

/// Parses an `HH:MM:SS` time string.
pub fn parse_time(input: &str) -> RecordResult<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M:%S").map_err(|_| RecordError::InvalidTime {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> MeetingRecord {
        MeetingRecord {
            topic: "Monthly Sync".to_string(),
            start_date: "2026-03-02".to_string(),
            start_time: "10:00:00".to_string(),
            host_email: Some("host@example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn duration_default() {
        let record = valid_record();
        assert_eq!(record.duration_minutes(), 60);

        let record = MeetingRecord {
            duration: Some(90),
            ..valid_record()
        };
        assert_eq!(record.duration_minutes(), 90);
    }

    #[test]
    fn start_datetime_field() {
        assert_eq!(valid_record().start_datetime_field(), "2026-03-02T10:00:00");
    }

    #[test]
    fn validation_accepts_complete_record() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn validation_rejects_missing_fields() {
        let record = MeetingRecord {
            host_email: None,
            ..valid_record()
        };
        assert_eq!(
            record.validate().unwrap_err(),
            RecordError::MissingField { field: "host_email" }
        );

        let record = MeetingRecord {
            topic: String::new(),
            ..valid_record()
        };
        assert_eq!(
            record.validate().unwrap_err(),
            RecordError::MissingField { field: "topic" }
        );
    }

    #[test]
    fn validation_rejects_bad_date_and_time() {
        let record = MeetingRecord {
            start_date: "03/02/2026".to_string(),
            ..valid_record()
        };
        assert!(record.validate().is_err());

        let record = MeetingRecord {
            start_time: "10am".to_string(),
            ..valid_record()
        };
        assert!(matches!(
            record.validate().unwrap_err(),
            RecordError::InvalidTime { .. }
        ));

        let record = MeetingRecord {
            end_date: Some("not-a-date".to_string()),
            ..valid_record()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn time_parsing() {
        assert!(parse_time("00:00:00").is_ok());
        assert!(parse_time("23:59:59").is_ok());
        assert!(parse_time("24:00:00").is_err());
        assert!(parse_time("10:00").is_err());
    }

    #[test]
    fn deserializes_from_config_json() {
        let json = r#"{
            "host_email": "user@example.com",
            "topic": "Weekly Team Meeting",
            "agenda": "Updates and blockers",
            "start_date": "2026-03-01",
            "start_time": "10:00:00",
            "duration": 60,
            "timezone": "America/New_York",
            "recurrence_type": "weekly",
            "weekly_days": "2",
            "end_date": "2026-12-31",
            "enable_registration": true,
            "waiting_room": false
        }"#;
        let record: MeetingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.topic, "Weekly Team Meeting");
        assert_eq!(record.weekly_days.as_deref(), Some("2"));
        assert_eq!(record.waiting_room, Some(false));
        assert!(record.validate().is_ok());
    }
}
