//! Journal reader implementation.

use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame};
use ecoaudit_core::AuditLogRecord;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use tracing::trace;

/// Read mode for handling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Strict mode: truncated frames are errors.
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Journal reader for audit records.
///
/// # Example
///
/// ```rust
/// use ecoaudit_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("pool.ecj");
/// JournalWriter::open(&path, WriteOptions::default())?.finish()?;
///
/// let mut reader = JournalReader::open(&path, ReadMode::Strict)?;
/// assert!(reader.read_record()?.is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalReader {
    file: File,
    mode: ReadMode,
    position: u64,
}

impl JournalReader {
    /// Opens a journal file and validates its header.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if:
    /// - File cannot be opened
    /// - File header is invalid
    /// - I/O error occurs
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut file = File::open(path)?;
        Self::read_header(&mut file)?;

        Ok(Self {
            file,
            mode,
            position: JournalHeader::HEADER_SIZE as u64,
        })
    }

    fn read_header(file: &mut File) -> Result<JournalHeader, JournalError> {
        file.seek(io::SeekFrom::Start(0))?;
        let mut header_bytes = [0u8; JournalHeader::HEADER_SIZE];
        file.read_exact(&mut header_bytes).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                JournalError::InvalidHeader("file shorter than header".to_string())
            } else {
                e.into()
            }
        })?;
        JournalHeader::from_bytes(&header_bytes)
    }

    /// Reads the next frame.
    ///
    /// Returns `Ok(None)` at end-of-file (or on truncation in permissive mode).
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        self.file.seek(io::SeekFrom::Start(self.position))?;

        let file_size = self.file.metadata()?.len();
        if self.position >= file_size {
            return Ok(None);
        }

        let mut frame_header_bytes = [0u8; RecordFrame::FRAME_HEADER_SIZE];
        if !self.read_or_truncated(&mut frame_header_bytes)? {
            return Ok(None);
        }
        let frame = RecordFrame::from_bytes(&frame_header_bytes, self.position)?;
        self.position += RecordFrame::FRAME_HEADER_SIZE as u64;

        let mut payload = vec![0u8; frame.len as usize];
        if !self.read_or_truncated(&mut payload)? {
            return Ok(None);
        }
        self.position += frame.len as u64;

        trace!(kind = ?frame.kind, len = frame.len, "frame read");
        Ok(Some((frame.kind, payload)))
    }

    /// Fills `buf`; `Ok(false)` means truncation in permissive mode.
    fn read_or_truncated(&mut self, buf: &mut [u8]) -> Result<bool, JournalError> {
        match self.file.read_exact(buf) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                if self.mode == ReadMode::Permissive {
                    return Ok(false);
                }
                Err(JournalError::TruncatedFrame {
                    offset: self.position,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the next audit record, skipping unknown frame kinds.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if:
    /// - Frame structure is invalid
    /// - The record payload does not decode
    /// - Truncation detected (in strict mode)
    /// - I/O error occurs
    pub fn read_record(&mut self) -> Result<Option<AuditLogRecord>, JournalError> {
        loop {
            let offset = self.position + RecordFrame::FRAME_HEADER_SIZE as u64;
            match self.read_frame()? {
                None => return Ok(None),
                Some((FrameKind::AuditRecord, payload)) => {
                    let record = AuditLogRecord::from_wire(&payload)
                        .map_err(|source| JournalError::Record { offset, source })?;
                    return Ok(Some(record));
                }
                Some((FrameKind::Unknown(_), _)) => continue,
            }
        }
    }
}

impl Iterator for JournalReader {
    type Item = Result<AuditLogRecord, JournalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
