//! create-meetings command.
//!
//! Reads a meetings config, creates each meeting through the API, and
//! appends successful creations to the CSV ledger. Records are submitted
//! sequentially with a pause between calls; one failing record is reported
//! and the batch continues.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use seriesbridge_providers::{LedgerRow, MeetingLedger, ZoomClient, ZoomCredentials};
use seriesbridge_schemas::{MeetingRecord, ZoomMeetingPayload};

use crate::config::MeetingsConfig;
use crate::error::CliResult;

/// Pause between creations to stay under the API rate limit.
const CREATE_PAUSE: Duration = Duration::from_secs(1);

/// Runs the create-meetings command.
pub async fn run(config_path: &Path, dry_run: bool) -> CliResult<()> {
    let config = MeetingsConfig::load(config_path)?;
    config.validate()?;

    if dry_run {
        for meeting in &config.meetings {
            let record = with_default_password(meeting, config.default_password.as_deref());
            record.validate()?;
            let payload = ZoomMeetingPayload::from_record(&record)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        return Ok(());
    }

    let api = config.credentials()?;
    let mut client = ZoomClient::new(ZoomCredentials {
        account_id: api.account_id.clone(),
        client_id: api.client_id.clone(),
        client_secret: api.client_secret.clone(),
    })?;
    let ledger = config.output_file.as_ref().map(MeetingLedger::new);

    let mut created = 0usize;
    let mut failed = 0usize;

    for (index, meeting) in config.meetings.iter().enumerate() {
        let number = index + 1;
        let record = with_default_password(meeting, config.default_password.as_deref());

        if let Err(err) = record.validate() {
            warn!("skipping meeting #{number} ('{}'): {err}", record.topic);
            failed += 1;
            continue;
        }
        let payload = match ZoomMeetingPayload::from_record(&record) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("skipping meeting #{number} ('{}'): {err}", record.topic);
                failed += 1;
                continue;
            }
        };
        // validate() guarantees the host email is present.
        let host = record.host_email.clone().unwrap_or_default();

        match client.create_meeting(&host, &payload).await {
            Ok(meeting) => {
                info!(id = meeting.id, topic = %meeting.topic, "meeting created");
                println!(
                    "Created meeting {} ('{}'): {}",
                    meeting.id,
                    meeting.topic,
                    meeting.join_url.as_deref().unwrap_or("-")
                );
                if let Some(ref ledger) = ledger {
                    ledger.append(&LedgerRow::from_meeting(&host, &meeting))?;
                }
                created += 1;
            }
            Err(err) => {
                error!("meeting #{number} ('{}') failed: {err}", record.topic);
                failed += 1;
            }
        }

        tokio::time::sleep(CREATE_PAUSE).await;
    }

    println!(
        "Done: {created} created, {failed} failed out of {} records.",
        config.meetings.len()
    );
    Ok(())
}

/// Applies the config-level passcode to records that do not set their own.
fn with_default_password(meeting: &MeetingRecord, default: Option<&str>) -> MeetingRecord {
    let mut record = meeting.clone();
    if record.password.is_none() {
        record.password = default.map(str::to_string);
    }
    record
}
