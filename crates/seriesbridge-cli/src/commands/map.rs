//! map command.
//!
//! Reads a meetings config, translates each monthly meeting into an event
//! record, and writes a ready-to-edit events config. Warnings and the batch
//! summary go to stderr so the generated JSON can be piped cleanly.

use std::fs;
use std::path::Path;

use seriesbridge_schemas::{MapOptions, map_meetings};

use crate::config::{EventsConfig, MeetingsConfig};
use crate::error::{CliError, CliResult};

/// Output-side settings placed in the generated events config.
#[derive(Debug, Clone)]
pub struct MapArgs {
    pub wordpress_url: String,
    pub username: String,
    pub app_password: String,
    pub status: String,
    pub default_timezone: String,
}

/// Runs the map command.
pub fn run(input: &Path, output: Option<&Path>, args: MapArgs) -> CliResult<()> {
    let config = MeetingsConfig::load(input)?;
    if config.meetings.is_empty() {
        return Err(CliError::Config("no meetings to map".to_string()));
    }

    let options = MapOptions {
        default_timezone: args.default_timezone.clone(),
        ..MapOptions::default()
    };
    let report = map_meetings(&config.meetings, &options);

    for warning in &report.warnings {
        eprintln!("{warning}");
    }
    eprintln!(
        "Read {} meetings, mapped {}, skipped {}.",
        report.read, report.mapped, report.skipped
    );

    let events_config = EventsConfig {
        wordpress_url: args.wordpress_url,
        username: args.username,
        app_password: args.app_password,
        status: Some(args.status),
        timezone: Some(args.default_timezone),
        event: None,
        events: report.events,
    };
    let rendered = serde_json::to_string_pretty(&events_config)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))?;
            eprintln!("Wrote events config to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
