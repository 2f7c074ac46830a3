//! Log command implementation.

use std::path::PathBuf;

use ecoaudit_journal::{verify_journal, JournalReader, ReadMode};
use serde_json::json;

use crate::output;

pub fn run(
    journal: PathBuf,
    json_output: bool,
    max_records: Option<u64>,
    verify: bool,
    permissive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verify {
        return run_verify(journal, json_output);
    }

    let mode = if permissive {
        ReadMode::Permissive
    } else {
        ReadMode::Strict
    };
    let mut reader = JournalReader::open(&journal, mode)
        .map_err(|e| format!("Failed to open journal {}: {}", journal.display(), e))?;

    if !json_output {
        output::print_record_header();
    }

    let mut count: u64 = 0;
    while max_records.map_or(true, |max| count < max) {
        let Some(record) = reader.read_record()? else {
            break;
        };
        if json_output {
            let line = json!({
                "record_id": record.digest(),
                "subject": record.wire_subject().as_padded_str(),
                "timestamp": record.timestamp,
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("{}", output::format_record_row(&record));
        }
        count += 1;
    }

    Ok(())
}

fn run_verify(journal: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = verify_journal(&journal)
        .map_err(|e| format!("Failed to read journal {}: {}", journal.display(), e))?;

    if json_output {
        let out = json!({
            "records": summary.records,
            "alternating": summary.is_alternating(),
            "repeats": summary.repeats.iter().map(|r| json!({
                "index": r.index,
                "subject": r.subject,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("records: {}", summary.records);
        for repeat in &summary.repeats {
            println!("repeat at #{}: {}", repeat.index, repeat.subject);
        }
    }

    if !summary.is_alternating() {
        return Err(format!(
            "{} repeated subject(s); a transition was lost or duplicated",
            summary.repeats.len()
        )
        .into());
    }
    Ok(())
}
