//! create-events command.
//!
//! Reads an events config and posts each event to the calendar plugin's
//! REST endpoint. Monthly series get a recurrence rule payload in the
//! schema variant the caller selected; other records post as single events.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use seriesbridge_core::{EndCondition, OrdinalWeekday, RecurrenceRule};
use seriesbridge_providers::WordPressClient;
use seriesbridge_schemas::{
    EventDefaults, EventPayload, EventRecord, TribeRulePayload, TribeSchemaVersion,
};

use crate::config::EventsConfig;
use crate::error::{CliError, CliResult};

/// Pause between creations to avoid hammering the site.
const CREATE_PAUSE: Duration = Duration::from_millis(500);

/// Runs the create-events command.
pub async fn run(config_path: &Path, dry_run: bool, schema: TribeSchemaVersion) -> CliResult<()> {
    let config = EventsConfig::load(config_path)?;
    config.validate()?;

    let defaults = EventDefaults {
        status: config.status.clone(),
        timezone: config.timezone.clone(),
    };
    let records = config.all_events();

    if dry_run {
        for record in records.iter().copied() {
            let payload = build_payload(record, &defaults, schema)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        return Ok(());
    }

    let client = WordPressClient::new(
        &config.wordpress_url,
        &config.username,
        &config.app_password,
    )?;

    let total = records.len();
    let mut created = 0usize;
    let mut failed = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let number = index + 1;
        let payload = match build_payload(record, &defaults, schema) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("skipping event #{number} ('{}'): {err}", record.title);
                failed += 1;
                continue;
            }
        };

        match client.create_event(&payload).await {
            Ok(event) => {
                info!(id = event.id, title = %payload.title, "event created");
                println!(
                    "Created event {} ('{}'){}",
                    event.id,
                    payload.title,
                    event
                        .url
                        .map(|url| format!(": {url}"))
                        .unwrap_or_default()
                );
                created += 1;
            }
            Err(err) => {
                error!("event #{number} ('{}') failed: {err}", payload.title);
                failed += 1;
            }
        }

        tokio::time::sleep(CREATE_PAUSE).await;
    }

    println!("Done: {created} created, {failed} failed out of {total} records.");
    Ok(())
}

/// Builds the wire payload for one record, attaching recurrence rules for
/// monthly series.
fn build_payload(
    record: &EventRecord,
    defaults: &EventDefaults,
    schema: TribeSchemaVersion,
) -> CliResult<EventPayload> {
    record.validate()?;

    let recurrence = match record.recurrence_pattern.as_deref() {
        Some(pattern) if pattern.eq_ignore_ascii_case("monthly") => {
            let day = record.recurrence_day.as_deref().ok_or_else(|| {
                CliError::Config(format!(
                    "event '{}' has recurrence_pattern but no recurrence_day",
                    record.title
                ))
            })?;
            let pattern = OrdinalWeekday::parse(day)?;
            let end = EndCondition::resolve(Some(record.end_date.as_str()), None)?;
            Some(TribeRulePayload::build(
                &RecurrenceRule::monthly(pattern, end),
                schema,
            ))
        }
        Some(other) => {
            return Err(CliError::Config(format!(
                "event '{}': unsupported recurrence_pattern '{}'",
                record.title, other
            )));
        }
        None => None,
    };

    Ok(EventPayload::build(record, defaults, recurrence))
}
