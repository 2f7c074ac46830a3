//! Audit log records and the sink they are appended to.

use std::fmt;

use ecoaudit_canonical::{RecordDigest, Subject, SUBJECT_LEN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire size of a record: 20-byte subject followed by a little-endian u64 timestamp.
pub const RECORD_WIRE_LEN: usize = SUBJECT_LEN + 8;

const SUMMER_SUBJECT: Subject = Subject::from_padded_unchecked(*b"ChangeToSummerTime  ");
const WINTER_SUBJECT: Subject = Subject::from_padded_unchecked(*b"ChangeToWinterTime  ");

/// The two subjects a daylight-saving transition can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditSubject {
    /// Winter to summer.
    ChangeToSummerTime,
    /// Summer to winter.
    ChangeToWinterTime,
}

impl AuditSubject {
    /// Fixed-width wire subject.
    pub fn subject(self) -> Subject {
        match self {
            AuditSubject::ChangeToSummerTime => SUMMER_SUBJECT,
            AuditSubject::ChangeToWinterTime => WINTER_SUBJECT,
        }
    }

    /// Looks up the audit subject for raw wire bytes.
    pub fn from_subject(subject: &Subject) -> Option<Self> {
        if *subject == SUMMER_SUBJECT {
            Some(AuditSubject::ChangeToSummerTime)
        } else if *subject == WINTER_SUBJECT {
            Some(AuditSubject::ChangeToWinterTime)
        } else {
            None
        }
    }
}

impl fmt::Display for AuditSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.subject(), f)
    }
}

/// Errors decoding a record from the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Payload has the wrong size.
    #[error("record payload is {0} bytes, expected 28")]
    InvalidLength(usize),
    /// Subject bytes are not one of the canonical subjects.
    #[error("unknown audit subject {0:?}")]
    UnknownSubject(String),
}

/// One entry in Pool's audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogRecord {
    /// Transition direction.
    pub subject: AuditSubject,
    /// Unix seconds at which the transition executed.
    pub timestamp: u64,
}

impl AuditLogRecord {
    /// Creates a record.
    pub fn new(subject: AuditSubject, timestamp: u64) -> Self {
        Self { subject, timestamp }
    }

    /// Padded 20-byte subject as written to the log.
    pub fn wire_subject(&self) -> Subject {
        self.subject.subject()
    }

    /// Encodes the record: `subject[20] || timestamp_le[8]`.
    pub fn to_wire(&self) -> [u8; RECORD_WIRE_LEN] {
        let mut bytes = [0u8; RECORD_WIRE_LEN];
        bytes[..SUBJECT_LEN].copy_from_slice(self.wire_subject().as_bytes());
        bytes[SUBJECT_LEN..].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes
    }

    /// Decodes a record produced by [`to_wire`](Self::to_wire).
    pub fn from_wire(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() != RECORD_WIRE_LEN {
            return Err(RecordError::InvalidLength(bytes.len()));
        }
        let mut subject_bytes = [0u8; SUBJECT_LEN];
        subject_bytes.copy_from_slice(&bytes[..SUBJECT_LEN]);
        let subject = Subject::from_bytes(subject_bytes)
            .ok()
            .and_then(|s| AuditSubject::from_subject(&s))
            .ok_or_else(|| {
                RecordError::UnknownSubject(String::from_utf8_lossy(&subject_bytes).into_owned())
            })?;

        let mut ts = [0u8; 8];
        ts.copy_from_slice(&bytes[SUBJECT_LEN..]);
        Ok(Self {
            subject,
            timestamp: u64::from_le_bytes(ts),
        })
    }

    /// Domain-separated digest of the wire encoding.
    pub fn digest(&self) -> RecordDigest {
        RecordDigest::compute(&self.to_wire())
    }
}

/// Failure reported by an [`AuditSink`].
#[derive(Error, Debug)]
#[error("audit log append failed: {0}")]
pub struct SinkError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl SinkError {
    /// Wraps the sink's own error.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(err.into())
    }
}

/// Destination for audit records (Pool's log).
pub trait AuditSink {
    /// Appends one record. On error nothing must have been recorded.
    fn append(&mut self, record: &AuditLogRecord) -> Result<(), SinkError>;
}

impl<S: AuditSink + ?Sized> AuditSink for Box<S> {
    fn append(&mut self, record: &AuditLogRecord) -> Result<(), SinkError> {
        (**self).append(record)
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<AuditLogRecord>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended so far, oldest first.
    pub fn records(&self) -> &[AuditLogRecord] {
        &self.records
    }
}

impl AuditSink for MemorySink {
    fn append(&mut self, record: &AuditLogRecord) -> Result<(), SinkError> {
        self.records.push(*record);
        Ok(())
    }
}
