use ecoaudit_core::RECORD_WIRE_LEN;

use crate::errors::JournalError;

/// Journal file magic bytes: `b"ECJ1"`.
pub const MAGIC: &[u8; 4] = b"ECJ1";

/// Current journal format version: `0x0001`.
pub const VERSION: u16 = 0x0001;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 8;

/// Maximum payload size; frames are small, fixed records.
pub const MAX_PAYLOAD_SIZE: u32 = 64 * 1024;

/// Record frame kind: AuditRecord.
pub const FRAME_KIND_AUDIT_RECORD: u8 = 0x01;

/// Journal file header (16 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalHeader {
    /// Magic bytes: `"ECJ1"`.
    pub magic: [u8; 4],
    /// Format version.
    pub version: u16,
    /// Reserved flags (must be 0).
    pub flags: u16,
    /// Reserved bytes (must be all zeros).
    pub reserved: [u8; 8],
}

impl JournalHeader {
    /// Header size constant.
    pub const HEADER_SIZE: usize = 16;

    /// Creates a new header with default values.
    pub fn new() -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
            flags: 0,
            reserved: [0; 8],
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.reserved);
        bytes
    }

    /// Deserializes and validates a header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JournalError> {
        if bytes.len() < HEADER_SIZE {
            return Err(JournalError::InvalidHeader(format!(
                "header too short: {} bytes",
                bytes.len()
            )));
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != *MAGIC {
            return Err(JournalError::InvalidHeader(format!(
                "invalid magic: {:?}, expected {:?}",
                magic, MAGIC
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(JournalError::InvalidHeader(format!(
                "unsupported version: 0x{:04x}, expected 0x{:04x}",
                version, VERSION
            )));
        }

        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        if flags != 0 {
            return Err(JournalError::InvalidHeader(format!(
                "non-zero flags: 0x{:04x}",
                flags
            )));
        }

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[8..16]);
        if reserved != [0u8; 8] {
            return Err(JournalError::InvalidHeader(
                "non-zero reserved bytes".to_string(),
            ));
        }

        Ok(Self {
            magic,
            version,
            flags,
            reserved,
        })
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record frame kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Audit record in its 28-byte wire format.
    AuditRecord,
    /// Unknown/unsupported frame kind; skipped by readers.
    Unknown(u8),
}

impl FrameKind {
    /// Creates a FrameKind from a byte value.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FRAME_KIND_AUDIT_RECORD => FrameKind::AuditRecord,
            _ => FrameKind::Unknown(byte),
        }
    }

    /// Returns the byte value for this kind.
    pub fn to_byte(self) -> u8 {
        match self {
            FrameKind::AuditRecord => FRAME_KIND_AUDIT_RECORD,
            FrameKind::Unknown(b) => b,
        }
    }
}

/// Record frame header (8 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    /// Frame kind.
    pub kind: FrameKind,
    /// Reserved bytes (must be all zeros).
    pub reserved: [u8; 3],
    /// Payload length in bytes (little-endian on disk).
    pub len: u32,
}

impl RecordFrame {
    /// Frame header size constant.
    pub const FRAME_HEADER_SIZE: usize = 8;

    /// Creates a new frame header.
    pub fn new(kind: FrameKind, len: u32) -> Result<Self, JournalError> {
        if len > MAX_PAYLOAD_SIZE {
            return Err(JournalError::PayloadTooLarge {
                size: len,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(Self {
            kind,
            reserved: [0; 3],
            len,
        })
    }

    /// Frame header for one audit record.
    pub fn audit_record() -> Self {
        Self {
            kind: FrameKind::AuditRecord,
            reserved: [0; 3],
            len: RECORD_WIRE_LEN as u32,
        }
    }

    /// Serializes the frame header to bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = self.kind.to_byte();
        bytes[1..4].copy_from_slice(&self.reserved);
        bytes[4..8].copy_from_slice(&self.len.to_le_bytes());
        bytes
    }

    /// Deserializes a frame header found at `offset`.
    pub fn from_bytes(bytes: &[u8], offset: u64) -> Result<Self, JournalError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("frame header too short: {} bytes", bytes.len()),
            });
        }

        let kind = FrameKind::from_byte(bytes[0]);
        let reserved = [bytes[1], bytes[2], bytes[3]];
        if reserved != [0u8; 3] {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: "non-zero reserved bytes".to_string(),
            });
        }
        let len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        if len > MAX_PAYLOAD_SIZE {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("payload size {} exceeds maximum {}", len, MAX_PAYLOAD_SIZE),
            });
        }
        if kind == FrameKind::AuditRecord && len as usize != RECORD_WIRE_LEN {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("audit record frame of {} bytes, expected {}", len, RECORD_WIRE_LEN),
            });
        }

        Ok(Self { kind, reserved, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = JournalHeader::new().to_bytes();
        assert_eq!(&bytes[0..4], b"ECJ1");
        assert_eq!(&bytes[4..6], &[0x01, 0x00]);
        assert_eq!(&bytes[6..], &[0u8; 10]);
        assert_eq!(JournalHeader::from_bytes(&bytes).unwrap(), JournalHeader::new());
    }

    #[test]
    fn header_rejects_invalid_magic() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[0] = b'N';
        assert!(JournalHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn header_rejects_invalid_version() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[4] = 0x02;
        let err = JournalHeader::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn header_rejects_non_zero_flags_and_reserved() {
        let mut flags = JournalHeader::new().to_bytes();
        flags[6] = 0x01;
        assert!(JournalHeader::from_bytes(&flags).is_err());

        let mut reserved = JournalHeader::new().to_bytes();
        reserved[8] = 0x01;
        assert!(JournalHeader::from_bytes(&reserved).is_err());
    }

    #[test]
    fn audit_frame_layout() {
        let bytes = RecordFrame::audit_record().to_bytes();
        assert_eq!(bytes, [0x01, 0, 0, 0, 28, 0, 0, 0]);
        let frame = RecordFrame::from_bytes(&bytes, 16).unwrap();
        assert_eq!(frame.kind, FrameKind::AuditRecord);
        assert_eq!(frame.len, 28);
    }

    #[test]
    fn audit_frame_rejects_wrong_length() {
        let mut bytes = RecordFrame::audit_record().to_bytes();
        bytes[4] = 27;
        match RecordFrame::from_bytes(&bytes, 40) {
            Err(JournalError::InvalidFrame { offset, .. }) => assert_eq!(offset, 40),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn frame_rejects_oversized_payload() {
        assert!(RecordFrame::new(FrameKind::Unknown(0x7f), MAX_PAYLOAD_SIZE + 1).is_err());
    }

    #[test]
    fn frame_kind_unknown() {
        assert_eq!(FrameKind::from_byte(0xFF), FrameKind::Unknown(0xFF));
        assert_eq!(FrameKind::Unknown(0xFF).to_byte(), 0xFF);
    }
}
