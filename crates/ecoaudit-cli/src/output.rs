//! Output formatting utilities.

use chrono::{DateTime, SecondsFormat};
use ecoaudit_core::{AuditLogRecord, Discrepancy, DiscrepancyKind};

/// Renders unix seconds as an RFC3339 UTC timestamp.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}

/// Formats a discrepancy as a table row.
pub fn format_discrepancy_row(d: &Discrepancy) -> String {
    let actual = d.actual.as_ref().map(|a| a.as_str()).unwrap_or("-");
    let kind = match d.kind {
        DiscrepancyKind::ReferenceMismatch => "mismatch",
        DiscrepancyKind::MissingReferenceSet => "missing",
    };
    format!(
        "{:<11} {:<11} {:<42} {:<42} {}",
        d.reporter.to_string(),
        d.role.to_string(),
        d.expected.as_str(),
        actual,
        kind
    )
}

/// Prints the discrepancy table header.
#[allow(clippy::print_literal)]
pub fn print_discrepancy_header() {
    println!(
        "{:<11} {:<11} {:<42} {:<42} {}",
        "REPORTER", "ROLE", "EXPECTED", "ACTUAL", "KIND"
    );
    println!("{}", "-".repeat(120));
}

/// Formats an audit record as a table row.
pub fn format_record_row(record: &AuditLogRecord) -> String {
    format!(
        "{:<44} {:<20} {}",
        record.digest().as_str(),
        record.wire_subject().as_padded_str(),
        format_timestamp(record.timestamp)
    )
}

/// Prints the audit record table header.
#[allow(clippy::print_literal)]
pub fn print_record_header() {
    println!("{:<44} {:<20} {}", "RECORD_ID", "SUBJECT", "TIMESTAMP");
    println!("{}", "-".repeat(90));
}
