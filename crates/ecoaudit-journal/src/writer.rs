//! Journal writer implementation.

use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame};
use ecoaudit_core::{AuditLogRecord, AuditSink, SinkError};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;
use tracing::{debug, error, warn};

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
    /// Whether to append to an existing file (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// Journal writer for append-only audit record storage.
///
/// Each append writes one complete frame. If the write fails, the file is
/// truncated back to where the frame started, so a failed append leaves no
/// partial record behind.
///
/// # Example
///
/// ```rust
/// use ecoaudit_core::{AuditLogRecord, AuditSubject};
/// use ecoaudit_journal::{JournalWriter, WriteOptions};
///
/// let dir = tempfile::tempdir()?;
/// let mut writer = JournalWriter::open(dir.path().join("pool.ecj"), WriteOptions::default())?;
/// writer.append_record(&AuditLogRecord::new(AuditSubject::ChangeToWinterTime, 1_729_990_800))?;
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalWriter {
    file: File,
    sync: bool,
    header_written: bool,
}

impl JournalWriter {
    /// Opens or creates a journal file for writing.
    ///
    /// If the file is empty a header is written. If it exists, its header is
    /// validated and the writer either appends (`options.append`) or
    /// truncates it back to the header.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if:
    /// - File cannot be opened/created
    /// - Existing file is not a valid journal
    /// - File is not empty but too small to be valid
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(options.create)
            .write(true)
            .read(true)
            .open(path.as_ref())?;

        let mut writer = Self {
            file,
            sync: options.sync,
            header_written: false,
        };

        let metadata = writer.file.metadata()?;
        if metadata.len() == 0 {
            writer.write_header()?;
        } else if metadata.len() < JournalHeader::HEADER_SIZE as u64 {
            return Err(JournalError::FileNotEmpty);
        } else {
            let mut header_bytes = [0u8; JournalHeader::HEADER_SIZE];
            writer.file.seek(io::SeekFrom::Start(0))?;
            writer.file.read_exact(&mut header_bytes)?;
            JournalHeader::from_bytes(&header_bytes)?;
            writer.header_written = true;
            if options.append {
                writer.file.seek(io::SeekFrom::End(0))?;
            } else {
                writer.file.set_len(JournalHeader::HEADER_SIZE as u64)?;
                writer
                    .file
                    .seek(io::SeekFrom::Start(JournalHeader::HEADER_SIZE as u64))?;
            }
        }

        debug!(path = %path.as_ref().display(), "journal opened for writing");
        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), JournalError> {
        let bytes = JournalHeader::new().to_bytes();
        self.file.write_all(&bytes)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        self.header_written = true;
        Ok(())
    }

    /// Appends one audit record.
    pub fn append_record(&mut self, record: &AuditLogRecord) -> Result<(), JournalError> {
        self.append_raw(FrameKind::AuditRecord, &record.to_wire())
    }

    /// Appends a raw frame with the given kind and payload.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        if !self.header_written {
            return Err(JournalError::InvalidHeader(
                "header not written".to_string(),
            ));
        }
        let len = u32::try_from(payload.len()).map_err(|_| JournalError::PayloadTooLarge {
            size: u32::MAX,
            max: crate::frame::MAX_PAYLOAD_SIZE,
        })?;
        let frame = RecordFrame::new(kind, len)?;

        let mut buf = Vec::with_capacity(RecordFrame::FRAME_HEADER_SIZE + payload.len());
        buf.extend_from_slice(&frame.to_bytes());
        buf.extend_from_slice(payload);

        let start = self.checkpoint()?;
        if let Err(write) = self.write_frame(&buf) {
            warn!(offset = start, error = %write, "append failed, rolling back partial frame");
            if let Err(rollback) = self.truncate_to(start) {
                error!(offset = start, error = %rollback, "rollback failed, partial frame left in journal");
                return Err(JournalError::RollbackFailed {
                    offset: start,
                    write,
                    rollback,
                });
            }
            return Err(write.into());
        }
        Ok(())
    }

    /// Current end of the journal, to pass to [`rollback`](Self::rollback).
    pub fn checkpoint(&mut self) -> Result<u64, JournalError> {
        Ok(self.file.seek(io::SeekFrom::End(0))?)
    }

    /// Discards every frame appended after `checkpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidFrame`] if `checkpoint` lies inside the
    /// header or past the end of the file.
    pub fn rollback(&mut self, checkpoint: u64) -> Result<(), JournalError> {
        let len = self.file.metadata()?.len();
        if checkpoint < JournalHeader::HEADER_SIZE as u64 || checkpoint > len {
            return Err(JournalError::InvalidFrame {
                offset: checkpoint,
                reason: format!("rollback point outside journal of {} bytes", len),
            });
        }
        self.truncate_to(checkpoint)?;
        debug!(offset = checkpoint, discarded = len - checkpoint, "journal rolled back");
        Ok(())
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.file.set_len(len)?;
        self.file.seek(io::SeekFrom::End(0))?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    fn write_frame(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    /// Finishes writing and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl AuditSink for JournalWriter {
    fn append(&mut self, record: &AuditLogRecord) -> Result<(), SinkError> {
        self.append_record(record).map_err(SinkError::new)
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
