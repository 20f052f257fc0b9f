//! Configuration file loading.
//!
//! Both batch tools read a single JSON file: a meetings config carrying the
//! API credentials and the meeting records, or an events config carrying the
//! WordPress connection details and the event records. The events config
//! accepts either an `events` list or a single `event` object.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use seriesbridge_schemas::{EventRecord, MeetingRecord};

use crate::error::{CliError, CliResult};

/// Server-to-server OAuth credentials from the meetings config.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoomApiConfig {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// The meetings configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingsConfig {
    /// API credentials. Optional so the same file can feed the `map`
    /// command, which never talks to the API.
    #[serde(default)]
    pub zoom_api: Option<ZoomApiConfig>,
    /// Path of the CSV ledger to append created meetings to.
    #[serde(default)]
    pub output_file: Option<String>,
    /// Passcode applied to meetings that do not set their own.
    #[serde(default)]
    pub default_password: Option<String>,
    /// The meeting records.
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
}

impl MeetingsConfig {
    /// Loads and parses a meetings config file.
    pub fn load(path: &Path) -> CliResult<Self> {
        read_json(path)
    }

    /// Returns the credentials, or a configuration error naming the missing
    /// section.
    pub fn credentials(&self) -> CliResult<&ZoomApiConfig> {
        let api = self
            .zoom_api
            .as_ref()
            .ok_or_else(|| CliError::Config("missing 'zoom_api' section".to_string()))?;
        for (field, value) in [
            ("zoom_api.account_id", &api.account_id),
            ("zoom_api.client_id", &api.client_id),
            ("zoom_api.client_secret", &api.client_secret),
        ] {
            if value.is_empty() {
                return Err(CliError::Config(format!("missing '{}'", field)));
            }
        }
        Ok(api)
    }

    /// Checks the config carries at least one meeting.
    pub fn validate(&self) -> CliResult<()> {
        if self.meetings.is_empty() {
            return Err(CliError::Config(
                "no meetings defined in configuration".to_string(),
            ));
        }
        Ok(())
    }
}

/// The events configuration file. Also the shape the `map` command writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// WordPress site URL.
    pub wordpress_url: String,
    /// WordPress username.
    pub username: String,
    /// WordPress application password.
    pub app_password: String,
    /// Config-level post status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Config-level timezone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// A single event record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRecord>,
    /// A list of event records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
}

impl EventsConfig {
    /// Loads and parses an events config file.
    pub fn load(path: &Path) -> CliResult<Self> {
        read_json(path)
    }

    /// Checks connection fields are present and at least one event is
    /// defined.
    pub fn validate(&self) -> CliResult<()> {
        for (field, value) in [
            ("wordpress_url", &self.wordpress_url),
            ("username", &self.username),
            ("app_password", &self.app_password),
        ] {
            if value.is_empty() {
                return Err(CliError::Config(format!("missing '{}'", field)));
            }
        }
        if self.event.is_none() && self.events.is_empty() {
            return Err(CliError::Config(
                "no events defined in configuration".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns all event records: the single `event` (if any) followed by
    /// the `events` list.
    pub fn all_events(&self) -> Vec<&EventRecord> {
        self.event.iter().chain(self.events.iter()).collect()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    debug!(path = %path.display(), "loading configuration");
    let raw = fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        CliError::Config(format!("cannot parse '{}': {}", path.display(), e))
    })
}
