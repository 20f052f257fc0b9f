//! Cross-system mapping: meeting-platform records to calendar event records.
//!
//! Each meeting record translates independently; one bad record never aborts
//! the batch. Every record produces exactly one [`MapOutcome`]: mapped
//! cleanly, mapped with an advisory note, or skipped with a reason. The
//! caller-facing [`MapReport`] aggregates counts and the ordered warning
//! list for the final summary.

use tracing::debug;

use seriesbridge_core::{EndCondition, RecurrenceError};

use crate::event::{EventRecord, compute_end_time, resolve_field};
use crate::meeting::MeetingRecord;
use crate::zoom::{RecurrenceFrequency, ZoomRecurrence};

/// Default venue for mapped virtual events.
pub const DEFAULT_VENUE: &str = "Virtual - Zoom";

/// Options controlling the mapping of a batch.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Fallback timezone when a meeting record does not define one.
    pub default_timezone: String,
    /// Venue assigned to every mapped event.
    pub venue: String,
    /// Categories assigned to every mapped event.
    pub categories: Vec<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            default_timezone: crate::event::DEFAULT_TIMEZONE.to_string(),
            venue: DEFAULT_VENUE.to_string(),
            categories: vec![
                "Collaboration Area".to_string(),
                "Zoom Meeting".to_string(),
            ],
        }
    }
}

/// The outcome of mapping one meeting record.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// Mapped with no caveats.
    Mapped(EventRecord),
    /// Mapped, but with an advisory note the summary should surface.
    MappedWithWarning {
        /// The produced event.
        event: EventRecord,
        /// Why the mapping is advisory (e.g. pattern derived, not explicit).
        note: String,
    },
    /// Not mapped; no event was produced.
    Skipped {
        /// Why the record was skipped.
        reason: String,
    },
}

/// Summary of a whole mapping batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapReport {
    /// Records read from the input.
    pub read: usize,
    /// Events produced (with or without warnings).
    pub mapped: usize,
    /// Records skipped.
    pub skipped: usize,
    /// One line per affected record, in input order.
    pub warnings: Vec<String>,
    /// The produced events, in input order.
    pub events: Vec<EventRecord>,
}

/// Maps one meeting record to a calendar event record.
///
/// Only monthly recurrence is mappable. The ordinal-weekday pattern comes
/// from the explicit `monthly_week`/`monthly_week_day` fields when both are
/// present and valid; otherwise it is derived from the start date, which
/// downgrades the outcome to [`MapOutcome::MappedWithWarning`].
pub fn map_meeting(meeting: &MeetingRecord, options: &MapOptions) -> MapOutcome {
    let frequency_label = meeting
        .recurrence_type
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("none")
        .to_ascii_lowercase();

    match RecurrenceFrequency::parse(&frequency_label) {
        Ok(RecurrenceFrequency::Monthly) => {}
        _ => {
            return MapOutcome::Skipped {
                reason: format!("unsupported recurrence_type={frequency_label}"),
            };
        }
    }

    let (pattern, derived) = match ZoomRecurrence::ordinal_pattern(
        meeting.monthly_week,
        meeting.monthly_week_day,
        Some(meeting.start_date.as_str()),
    ) {
        Ok(result) => result,
        Err(RecurrenceError::MissingDerivationInput) => {
            return MapOutcome::Skipped {
                reason: "no explicit week fields and no start date to derive a pattern from"
                    .to_string(),
            };
        }
        Err(err) => {
            return MapOutcome::Skipped {
                reason: err.to_string(),
            };
        }
    };

    // The series end feeds the event record's end date; an invalid explicit
    // end date skips the record rather than silently producing an open
    // series.
    let end = match EndCondition::resolve(meeting.end_date.as_deref(), meeting.occurrences) {
        Ok(end) => end,
        Err(err) => {
            return MapOutcome::Skipped {
                reason: err.to_string(),
            };
        }
    };

    let start_time = if meeting.start_time.is_empty() {
        "00:00:00".to_string()
    } else {
        meeting.start_time.clone()
    };
    let end_time = match compute_end_time(&start_time, meeting.duration_minutes()) {
        Ok(end_time) => end_time,
        Err(err) => {
            return MapOutcome::Skipped {
                reason: err.to_string(),
            };
        }
    };

    let series_end_date = end
        .on_date()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| meeting.start_date.clone());

    let timezone = resolve_field(
        meeting.timezone.as_deref(),
        Some(&options.default_timezone),
        crate::event::DEFAULT_TIMEZONE,
    )
    .to_string();

    let event = EventRecord {
        title: meeting.topic.clone(),
        description: meeting.agenda.clone(),
        start_date: meeting.start_date.clone(),
        end_date: series_end_date,
        start_time,
        end_time,
        recurrence_pattern: Some("MONTHLY".to_string()),
        recurrence_day: Some(pattern.to_string()),
        venue: Some(options.venue.clone()),
        organizer: meeting.host_email.clone(),
        categories: options.categories.clone(),
        timezone: Some(timezone),
        status: None,
        all_day: None,
    };

    if derived {
        MapOutcome::MappedWithWarning {
            event,
            note: "pattern derived from start date, not explicit fields".to_string(),
        }
    } else {
        MapOutcome::Mapped(event)
    }
}

/// Maps a batch of meeting records, collecting a summary report.
pub fn map_meetings(meetings: &[MeetingRecord], options: &MapOptions) -> MapReport {
    let mut report = MapReport {
        read: meetings.len(),
        ..MapReport::default()
    };

    for (index, meeting) in meetings.iter().enumerate() {
        let number = index + 1;
        let topic = if meeting.topic.is_empty() {
            "Untitled"
        } else {
            meeting.topic.as_str()
        };

        match map_meeting(meeting, options) {
            MapOutcome::Mapped(event) => {
                debug!(topic, "mapped meeting");
                report.mapped += 1;
                report.events.push(event);
            }
            MapOutcome::MappedWithWarning { event, note } => {
                report.mapped += 1;
                report
                    .warnings
                    .push(format!("Mapped meeting #{number} ('{topic}') with note: {note}"));
                report.events.push(event);
            }
            MapOutcome::Skipped { reason } => {
                report.skipped += 1;
                report
                    .warnings
                    .push(format!("Skipped meeting #{number} ('{topic}'): {reason}"));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_meeting() -> MeetingRecord {
        MeetingRecord {
            topic: "Cluster Sync".to_string(),
            start_date: "2026-03-02".to_string(),
            start_time: "10:00:00".to_string(),
            duration: Some(60),
            host_email: Some("host@example.com".to_string()),
            agenda: Some("Monthly community call".to_string()),
            recurrence_type: Some("monthly".to_string()),
            monthly_week: Some(1),
            monthly_week_day: Some(2),
            end_date: Some("2026-12-31".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn maps_explicit_fields_without_warning() {
        let outcome = map_meeting(&monthly_meeting(), &MapOptions::default());
        let MapOutcome::Mapped(event) = outcome else {
            panic!("expected clean mapping, got {outcome:?}");
        };
        assert_eq!(event.title, "Cluster Sync");
        assert_eq!(event.recurrence_pattern.as_deref(), Some("MONTHLY"));
        assert_eq!(event.recurrence_day.as_deref(), Some("first monday"));
        assert_eq!(event.start_date, "2026-03-02");
        assert_eq!(event.end_date, "2026-12-31");
        assert_eq!(event.end_time, "11:00:00");
        assert_eq!(event.venue.as_deref(), Some("Virtual - Zoom"));
        assert_eq!(event.organizer.as_deref(), Some("host@example.com"));
        assert_eq!(
            event.categories,
            vec!["Collaboration Area".to_string(), "Zoom Meeting".to_string()]
        );
    }

    #[test]
    fn derives_pattern_from_start_date_with_warning() {
        let meeting = MeetingRecord {
            monthly_week: None,
            monthly_week_day: None,
            ..monthly_meeting()
        };
        let outcome = map_meeting(&meeting, &MapOptions::default());
        let MapOutcome::MappedWithWarning { event, note } = outcome else {
            panic!("expected warned mapping, got {outcome:?}");
        };
        assert_eq!(event.recurrence_day.as_deref(), Some("first monday"));
        assert_eq!(note, "pattern derived from start date, not explicit fields");
    }

    #[test]
    fn skips_weekly_records() {
        let meeting = MeetingRecord {
            recurrence_type: Some("weekly".to_string()),
            ..monthly_meeting()
        };
        let outcome = map_meeting(&meeting, &MapOptions::default());
        assert_eq!(
            outcome,
            MapOutcome::Skipped {
                reason: "unsupported recurrence_type=weekly".to_string()
            }
        );
    }

    #[test]
    fn skips_missing_recurrence_type() {
        let meeting = MeetingRecord {
            recurrence_type: None,
            ..monthly_meeting()
        };
        let outcome = map_meeting(&meeting, &MapOptions::default());
        assert_eq!(
            outcome,
            MapOutcome::Skipped {
                reason: "unsupported recurrence_type=none".to_string()
            }
        );
    }

    #[test]
    fn skips_when_nothing_to_derive_from() {
        let meeting = MeetingRecord {
            monthly_week: None,
            monthly_week_day: None,
            start_date: String::new(),
            ..monthly_meeting()
        };
        let outcome = map_meeting(&meeting, &MapOptions::default());
        let MapOutcome::Skipped { reason } = outcome else {
            panic!("expected skip");
        };
        assert!(reason.contains("no explicit week fields"));
    }

    #[test]
    fn timezone_resolution_chain() {
        // Record value wins.
        let meeting = MeetingRecord {
            timezone: Some("Europe/Paris".to_string()),
            ..monthly_meeting()
        };
        let MapOutcome::Mapped(event) = map_meeting(&meeting, &MapOptions::default()) else {
            panic!("expected mapping");
        };
        assert_eq!(event.timezone.as_deref(), Some("Europe/Paris"));

        // Options default applies when the record is silent.
        let options = MapOptions {
            default_timezone: "UTC".to_string(),
            ..MapOptions::default()
        };
        let MapOutcome::Mapped(event) = map_meeting(&monthly_meeting(), &options) else {
            panic!("expected mapping");
        };
        assert_eq!(event.timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn batch_report_counts_and_warnings() {
        let meetings = vec![
            monthly_meeting(),
            MeetingRecord {
                topic: "Weekly Standup".to_string(),
                recurrence_type: Some("weekly".to_string()),
                ..monthly_meeting()
            },
            MeetingRecord {
                topic: "Derived Sync".to_string(),
                monthly_week: None,
                monthly_week_day: None,
                start_date: "2026-03-30".to_string(),
                ..monthly_meeting()
            },
        ];

        let report = map_meetings(&meetings, &MapOptions::default());
        assert_eq!(report.read, 3);
        assert_eq!(report.mapped, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(
            report.warnings[0],
            "Skipped meeting #2 ('Weekly Standup'): unsupported recurrence_type=weekly"
        );
        assert!(report.warnings[1].starts_with("Mapped meeting #3 ('Derived Sync') with note:"));
        // The derived record falls in the last window of March.
        assert_eq!(report.events[1].recurrence_day.as_deref(), Some("last monday"));
    }

    #[test]
    fn one_bad_record_does_not_abort_the_batch() {
        let meetings = vec![
            MeetingRecord {
                end_date: Some("not-a-date".to_string()),
                ..monthly_meeting()
            },
            monthly_meeting(),
        ];
        let report = map_meetings(&meetings, &MapOptions::default());
        assert_eq!(report.read, 2);
        assert_eq!(report.mapped, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.warnings[0].contains("invalid date"));
    }
}
