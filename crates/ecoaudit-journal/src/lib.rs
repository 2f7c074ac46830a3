//! Append-only journal for Pool's audit log.
//!
//! This crate provides:
//! - Framed, append-only storage for audit records
//! - Reader/writer APIs with strict and permissive modes
//! - A whole-journal check that transitions alternate
//! - An inter-process lock serializing writers of one journal
//!
//! ## Quick Start
//!
//! ```rust
//! use ecoaudit_core::{AuditLogRecord, AuditSubject};
//! use ecoaudit_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("pool-audit.ecj");
//!
//! let mut writer = JournalWriter::open(&path, WriteOptions::default())?;
//! writer.append_record(&AuditLogRecord::new(AuditSubject::ChangeToSummerTime, 1_711_846_800))?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open(&path, ReadMode::Strict)?;
//! while let Some(record) = reader.read_record()? {
//!     println!("{} at {}", record.subject, record.timestamp);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Format
//!
//! - 16-byte header: magic `ECJ1`, version `0x0001`, flags and reserved bytes zero
//! - 8-byte frame header per record: kind, 3 reserved bytes, little-endian length
//! - Audit record payload: 20-byte space-padded subject, little-endian u64 timestamp

#![deny(missing_docs)]

/// Error types for journal operations.
pub mod errors;
/// Frame structure and serialization.
pub mod frame;
/// Inter-process exclusive lock for a journal.
pub mod lock;
/// Journal reader implementation.
pub mod reader;
/// Whole-journal checks.
pub mod verification;
/// Journal writer implementation.
pub mod writer;

pub use errors::JournalError;
pub use frame::{FrameKind, JournalHeader, RecordFrame};
pub use lock::JournalLock;
pub use reader::{JournalReader, ReadMode};
pub use verification::{verify_journal, JournalSummary, SubjectRepeat};
pub use writer::{JournalWriter, WriteOptions};
