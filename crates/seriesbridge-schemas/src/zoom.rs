//! Meeting-platform (Zoom) recurrence and meeting payloads.
//!
//! [`ZoomRecurrence`] is the numeric recurrence object the platform's API
//! expects: frequency as an integer, weekdays Sunday=1 .. Saturday=7, and
//! monthly rules expressed either as a fixed day of month or as a week
//! position plus weekday — the two field groups are mutually exclusive.

use serde::{Deserialize, Serialize};

use seriesbridge_core::{
    EndCondition, OrdinalWeekday, Position, RecurrenceError, RecurrenceRule, Result, Weekday,
    derive_pattern, parse_date,
};

use crate::meeting::MeetingRecord;

/// Recurrence frequency in the platform's numeric encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    /// `type: 1`
    Daily,
    /// `type: 2`
    Weekly,
    /// `type: 3`
    Monthly,
}

impl RecurrenceFrequency {
    /// Parses a frequency label, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::UnsupportedRecurrenceType`] for anything
    /// other than `daily`, `weekly`, or `monthly`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(RecurrenceError::UnsupportedRecurrenceType {
                value: value.to_string(),
            }),
        }
    }

    /// Returns the numeric wire code (1 daily, 2 weekly, 3 monthly).
    pub fn code(&self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
        }
    }
}

/// The recurrence object of a meeting payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRecurrence {
    /// Frequency code: 1 daily, 2 weekly, 3 monthly.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Repeat every N days/weeks/months.
    pub repeat_interval: u32,
    /// Weekly: comma-separated weekday codes, Sunday=1 .. Saturday=7.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_days: Option<String>,
    /// Monthly: fixed day of month (1-31). Mutually exclusive with the week
    /// fields below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_day: Option<u32>,
    /// Monthly: week position (1-4, -1 for last).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_week: Option<i8>,
    /// Monthly: weekday code (Sunday=1 .. Saturday=7).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_week_day: Option<u8>,
    /// Series end instant, `YYYY-MM-DDTHH:MM:SSZ`. Wins over `end_times`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
    /// Series end after N occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_times: Option<u32>,
}

impl ZoomRecurrence {
    /// Builds the recurrence object for a meeting record.
    ///
    /// Defaults to weekly when the record does not set a frequency, matching
    /// the platform's configuration conventions. Weekly records without
    /// explicit `weekly_days` and monthly records without explicit day
    /// fields fall back to the start date (its weekday, or its day of
    /// month).
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::UnsupportedRecurrenceType`] for unknown
    /// frequencies, [`RecurrenceError::InvalidDate`] when a fallback needs
    /// the start date and it does not parse, and
    /// [`RecurrenceError::InvalidWeekdayCode`] when explicit week fields are
    /// out of domain.
    pub fn from_meeting(meeting: &MeetingRecord) -> Result<Self> {
        let frequency =
            RecurrenceFrequency::parse(meeting.recurrence_type.as_deref().unwrap_or("weekly"))?;

        let mut recurrence = Self {
            kind: frequency.code(),
            repeat_interval: meeting.repeat_interval.unwrap_or(1),
            ..Self::default()
        };

        match frequency {
            RecurrenceFrequency::Daily => {}
            RecurrenceFrequency::Weekly => {
                recurrence.weekly_days = match &meeting.weekly_days {
                    Some(days) => Some(days.clone()),
                    // Default to the start date's weekday, composed through
                    // the canonical enum rather than integer arithmetic.
                    None => {
                        let date = parse_date(&meeting.start_date)?;
                        let weekday = Weekday::from_chrono(chrono::Datelike::weekday(&date));
                        Some(weekday.zoom_number().to_string())
                    }
                };
            }
            RecurrenceFrequency::Monthly => {
                match (meeting.monthly_week, meeting.monthly_week_day) {
                    (Some(week), Some(week_day)) => {
                        // Validate both codes through the domain types; the
                        // day-of-month field stays cleared because the API
                        // treats the two groups as mutually exclusive.
                        let position = Position::from_number(week)?;
                        let weekday = Weekday::from_zoom_number(week_day)?;
                        recurrence.monthly_week = Some(position.as_number());
                        recurrence.monthly_week_day = Some(weekday.zoom_number());
                    }
                    _ => {
                        recurrence.monthly_day = match meeting.monthly_day {
                            Some(day) => Some(day),
                            None => {
                                let date = parse_date(&meeting.start_date)?;
                                Some(chrono::Datelike::day(&date))
                            }
                        };
                    }
                }
            }
        }

        recurrence.apply_end(EndCondition::resolve(
            meeting.end_date.as_deref(),
            meeting.occurrences,
        )?);
        Ok(recurrence)
    }

    /// Builds a monthly ordinal-weekday recurrence from a normalized rule.
    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        let mut recurrence = Self {
            kind: RecurrenceFrequency::Monthly.code(),
            repeat_interval: rule.interval,
            monthly_week: Some(rule.pattern.position.as_number()),
            monthly_week_day: Some(rule.pattern.weekday.zoom_number()),
            ..Self::default()
        };
        recurrence.apply_end(rule.end);
        recurrence
    }

    /// Extracts the ordinal-weekday pattern from a monthly recurrence.
    ///
    /// Uses the explicit week fields when both are present and valid;
    /// otherwise derives the pattern from the given start date. The second
    /// tuple element reports whether derivation was used.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::MissingDerivationInput`] when neither
    /// explicit fields nor a start date are available.
    pub fn ordinal_pattern(
        monthly_week: Option<i8>,
        monthly_week_day: Option<u8>,
        start_date: Option<&str>,
    ) -> Result<(OrdinalWeekday, bool)> {
        if let (Some(week), Some(week_day)) = (monthly_week, monthly_week_day)
            && let (Ok(position), Ok(weekday)) =
                (Position::from_number(week), Weekday::from_zoom_number(week_day))
        {
            return Ok((OrdinalWeekday::new(position, weekday), false));
        }

        match start_date {
            Some(raw) if !raw.trim().is_empty() => {
                let date = parse_date(raw)?;
                Ok((derive_pattern(date), true))
            }
            _ => Err(RecurrenceError::MissingDerivationInput),
        }
    }

    fn apply_end(&mut self, end: EndCondition) {
        match end {
            EndCondition::OnDate(date) => {
                self.end_date_time = Some(format!("{}T00:00:00Z", date.format("%Y-%m-%d")));
            }
            EndCondition::AfterOccurrences(n) => self.end_times = Some(n),
            EndCondition::Never => {}
        }
    }
}

/// Meeting settings block with the platform's documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomMeetingSettings {
    pub host_video: bool,
    pub participant_video: bool,
    pub join_before_host: bool,
    pub mute_upon_entry: bool,
    pub watermark: bool,
    pub use_pmi: bool,
    /// 0 auto-approve, 1 manual, 2 no registration required.
    pub approval_type: u8,
    /// 1 register once for all occurrences.
    pub registration_type: u8,
    pub audio: String,
    pub auto_recording: String,
    pub waiting_room: bool,
    pub meeting_authentication: bool,
}

/// The full meeting creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomMeetingPayload {
    /// Meeting title.
    pub topic: String,
    /// Always 8: recurring meeting with fixed time.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Combined `YYYY-MM-DDTHH:MM:SS` start.
    pub start_time: String,
    /// Duration in minutes.
    pub duration: u32,
    /// IANA timezone string.
    pub timezone: String,
    /// Agenda text.
    pub agenda: String,
    /// The recurrence object.
    pub recurrence: ZoomRecurrence,
    /// Meeting settings.
    pub settings: ZoomMeetingSettings,
    /// Meeting passcode, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ZoomMeetingPayload {
    /// Builds the meeting creation payload for one record.
    ///
    /// Registration is enabled by default: unless the record disables it,
    /// `approval_type` falls back to 0 (auto-approve) rather than 2.
    pub fn from_record(meeting: &MeetingRecord) -> Result<Self> {
        let enable_registration = meeting.enable_registration.unwrap_or(true);
        let approval_type = if enable_registration {
            meeting.approval_type.unwrap_or(0)
        } else {
            meeting.approval_type.unwrap_or(2)
        };

        Ok(Self {
            topic: meeting.topic.clone(),
            kind: 8,
            start_time: meeting.start_datetime_field(),
            duration: meeting.duration_minutes(),
            timezone: meeting
                .timezone
                .clone()
                .unwrap_or_else(|| "UTC".to_string()),
            agenda: meeting.agenda.clone().unwrap_or_default(),
            recurrence: ZoomRecurrence::from_meeting(meeting)?,
            settings: ZoomMeetingSettings {
                host_video: meeting.host_video.unwrap_or(true),
                participant_video: meeting.participant_video.unwrap_or(true),
                join_before_host: meeting.join_before_host.unwrap_or(false),
                mute_upon_entry: meeting.mute_upon_entry.unwrap_or(true),
                watermark: meeting.watermark.unwrap_or(false),
                use_pmi: false,
                approval_type,
                registration_type: meeting.registration_type.unwrap_or(1),
                audio: meeting.audio.clone().unwrap_or_else(|| "both".to_string()),
                auto_recording: meeting
                    .auto_recording
                    .clone()
                    .unwrap_or_else(|| "none".to_string()),
                waiting_room: meeting.waiting_room.unwrap_or(true),
                meeting_authentication: meeting.meeting_authentication.unwrap_or(false),
            },
            password: meeting.password.clone(),
        })
    }
}
