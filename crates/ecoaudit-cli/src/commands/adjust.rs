//! Adjust-daylight command implementation.

use std::path::PathBuf;

use ecoaudit_canonical::Address;
use ecoaudit_core::config::save_state;
use ecoaudit_core::{Coordinator, EcosystemConfig, SystemClock};
use ecoaudit_journal::{JournalLock, JournalWriter, WriteOptions};
use serde_json::json;
use tracing::{info, warn};

use crate::output;

pub fn run(
    config: PathBuf,
    caller: Address,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = EcosystemConfig::from_file(&config)
        .map_err(|e| format!("Failed to load config: {}", e))?;
    let registry = config.registry()?;

    // Held from reading the state until the new state is persisted.
    let journal_path = config.journal_path();
    let lock = JournalLock::acquire(&journal_path)
        .map_err(|e| format!("Failed to lock journal {}: {}", journal_path.display(), e))?;
    let current = config.load_state()?;

    let mut writer = JournalWriter::open(
        &journal_path,
        WriteOptions {
            sync: config.journal.sync,
            create: true,
            append: true,
        },
    )
    .map_err(|e| format!("Failed to open journal {}: {}", journal_path.display(), e))?;
    let checkpoint = writer.checkpoint()?;

    let coordinator = Coordinator::new(current, writer, config.allow_list(&registry), SystemClock);
    let record = coordinator.adjust_daylight_saving(&caller)?;
    let (state, mut writer) = coordinator.into_parts();

    let state_path = config.state_path();
    if let Err(e) = save_state(&state_path, &state) {
        warn!(path = %state_path.display(), error = %e, "state not saved, rolling back journal");
        writer.rollback(checkpoint).map_err(|rollback| {
            format!(
                "State not saved ({}) and journal rollback failed: {}",
                e, rollback
            )
        })?;
        writer.finish()?;
        return Err(format!("Transition rolled back, state not saved: {}", e).into());
    }
    writer.finish()?;
    drop(lock);
    info!(path = %state_path.display(), "daylight state saved");

    if json_output {
        let out = json!({
            "record": {
                "record_id": record.digest(),
                "subject": record.wire_subject().as_padded_str(),
                "timestamp": record.timestamp,
            },
            "state": state,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        output::print_record_header();
        println!("{}", output::format_record_row(&record));
        println!();
        println!("season: {} (scheduled: {})", state.season(), state.scheduled);
    }

    Ok(())
}
