//! CSV ledger of created meetings.
//!
//! Each successful creation appends one row to an output file so that a
//! batch run leaves a record of meeting IDs and join links. The header is
//! written only when the file does not exist yet, so repeated runs extend
//! the same ledger.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::zoom::CreatedMeeting;

/// One row of the meetings ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    /// When the row was written, RFC 3339.
    pub created_at: String,
    /// Email of the hosting user.
    pub host_email: String,
    /// The platform-assigned meeting ID.
    pub meeting_id: u64,
    /// Meeting title.
    pub meeting_topic: String,
    /// First occurrence start, as the server reported it.
    pub start_time: String,
    /// IANA timezone string.
    pub timezone: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Join link for attendees.
    pub join_url: String,
    /// Registration link, empty when registration is disabled.
    pub registration_url: String,
    /// Recurrence frequency code of the created series.
    pub recurrence_type: u8,
    /// Number of scheduled occurrences the server returned.
    pub occurrences: usize,
}

impl LedgerRow {
    /// Builds a row from a created meeting, stamped with the current time.
    pub fn from_meeting(host_email: &str, meeting: &CreatedMeeting) -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            host_email: host_email.to_string(),
            meeting_id: meeting.id,
            meeting_topic: meeting.topic.clone(),
            start_time: meeting.start_time.clone().unwrap_or_default(),
            timezone: meeting.timezone.clone().unwrap_or_default(),
            duration: meeting.duration.unwrap_or_default(),
            join_url: meeting.join_url.clone().unwrap_or_default(),
            registration_url: meeting.registration_url.clone().unwrap_or_default(),
            recurrence_type: meeting.recurrence.as_ref().map(|r| r.kind).unwrap_or(0),
            occurrences: meeting.occurrences.len(),
        }
    }
}

/// Appends rows to a CSV ledger file.
pub struct MeetingLedger {
    path: PathBuf,
}

impl MeetingLedger {
    /// Creates a ledger writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, writing the header first when the file is new.
    pub fn append(&self, row: &LedgerRow) -> ApiResult<()> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ApiError::configuration(format!(
                    "cannot open ledger '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(row).map_err(|e| {
            ApiError::configuration(format!(
                "cannot write ledger '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        writer.flush().map_err(|e| {
            ApiError::configuration(format!(
                "cannot flush ledger '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        debug!(path = %self.path.display(), meeting_id = row.meeting_id, "ledger row written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(id: u64) -> CreatedMeeting {
        CreatedMeeting {
            id,
            topic: "Monthly Sync".to_string(),
            start_time: Some("2026-03-02T10:00:00Z".to_string()),
            timezone: Some("America/New_York".to_string()),
            duration: Some(60),
            join_url: Some(format!("https://example.com/j/{}", id)),
            registration_url: None,
            recurrence: None,
            occurrences: Vec::new(),
        }
    }

    #[test]
    fn header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meetings.csv");
        let ledger = MeetingLedger::new(&path);

        ledger
            .append(&LedgerRow::from_meeting("a@example.com", &meeting(1)))
            .unwrap();
        ledger
            .append(&LedgerRow::from_meeting("b@example.com", &meeting(2)))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("created_at,host_email,meeting_id"));
        assert!(lines[1].contains("a@example.com"));
        assert!(lines[2].contains("b@example.com"));
    }

    #[test]
    fn row_fields_round_out_missing_values() {
        let row = LedgerRow::from_meeting(
            "host@example.com",
            &CreatedMeeting {
                id: 7,
                topic: "Bare".to_string(),
                start_time: None,
                timezone: None,
                duration: None,
                join_url: None,
                registration_url: None,
                recurrence: None,
                occurrences: Vec::new(),
            },
        );
        assert_eq!(row.meeting_id, 7);
        assert_eq!(row.join_url, "");
        assert_eq!(row.recurrence_type, 0);
        assert_eq!(row.occurrences, 0);
    }
}
