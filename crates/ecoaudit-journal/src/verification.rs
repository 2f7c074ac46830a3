//! Whole-journal checks.

use crate::errors::JournalError;
use crate::reader::{JournalReader, ReadMode};
use ecoaudit_core::{AuditLogRecord, AuditSubject};
use std::path::Path;

/// Two consecutive records with the same subject.
///
/// Transitions always flip the season, so a repeat means a record was lost
/// or written twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRepeat {
    /// Zero-based index of the second record of the pair.
    pub index: usize,
    /// The repeated subject.
    pub subject: AuditSubject,
}

/// Result of [`verify_journal`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalSummary {
    /// Number of records read.
    pub records: usize,
    /// Last record, if any.
    pub last: Option<AuditLogRecord>,
    /// Every place the alternation breaks.
    pub repeats: Vec<SubjectRepeat>,
}

impl JournalSummary {
    /// True when subjects strictly alternate.
    pub fn is_alternating(&self) -> bool {
        self.repeats.is_empty()
    }
}

/// Reads the whole journal in strict mode and checks that subjects alternate.
pub fn verify_journal<P: AsRef<Path>>(path: P) -> Result<JournalSummary, JournalError> {
    let reader = JournalReader::open(path, ReadMode::Strict)?;
    let mut summary = JournalSummary::default();
    for record in reader {
        let record = record?;
        if let Some(prev) = summary.last {
            if prev.subject == record.subject {
                summary.repeats.push(SubjectRepeat {
                    index: summary.records,
                    subject: record.subject,
                });
            }
        }
        summary.records += 1;
        summary.last = Some(record);
    }
    Ok(summary)
}
