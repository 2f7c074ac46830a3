use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (kind, reserved bytes, or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u32,
        /// Maximum allowed size.
        max: u32,
    },
    /// Audit record payload could not be decoded.
    #[error("invalid audit record at offset {offset}: {source}")]
    Record {
        /// Byte offset of the payload.
        offset: u64,
        /// Decoding failure.
        #[source]
        source: ecoaudit_core::RecordError,
    },
    /// File exists but is too short to hold a header.
    #[error("file is not empty; cannot initialize header")]
    FileNotEmpty,
    /// A failed append could not be undone; bytes past `offset` are garbage.
    #[error("rollback to offset {offset} failed after {write}: {rollback}")]
    RollbackFailed {
        /// Length the file should have been truncated to.
        offset: u64,
        /// Error that triggered the rollback.
        write: std::io::Error,
        /// Error raised by the rollback itself.
        #[source]
        rollback: std::io::Error,
    },
    /// Another process holds the journal lock.
    #[error("journal {path} is locked by another process: {source}")]
    Locked {
        /// Lock file path.
        path: std::path::PathBuf,
        /// Underlying lock error.
        #[source]
        source: std::io::Error,
    },
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
}
