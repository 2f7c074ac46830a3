use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Width of the subject field in bytes.
pub const SUBJECT_LEN: usize = 20;

/// Fixed 20-byte ASCII subject, padded with trailing spaces.
///
/// This is the subject field of an audit record exactly as it appears on the
/// wire: `"ChangeToSummerTime"` is stored as `"ChangeToSummerTime  "`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject([u8; SUBJECT_LEN]);

impl Subject {
    /// Builds a subject from ASCII text, padding it to [`SUBJECT_LEN`] bytes.
    pub fn from_ascii(value: &str) -> Result<Self, ValidationError> {
        if !value.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
            return Err(ValidationError::NonAsciiSubject(value.to_string()));
        }
        if value.len() > SUBJECT_LEN {
            return Err(ValidationError::SubjectTooLong {
                value: value.to_string(),
                len: value.len(),
                max: SUBJECT_LEN,
            });
        }
        let mut bytes = [b' '; SUBJECT_LEN];
        bytes[..value.len()].copy_from_slice(value.as_bytes());
        Ok(Self(bytes))
    }

    /// Wraps already padded bytes without validation.
    ///
    /// Callers must pass printable ASCII; used for compile-time constants.
    pub const fn from_padded_unchecked(bytes: [u8; SUBJECT_LEN]) -> Self {
        Self(bytes)
    }

    /// Reads a subject from its raw wire bytes.
    pub fn from_bytes(bytes: [u8; SUBJECT_LEN]) -> Result<Self, ValidationError> {
        if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return Err(ValidationError::NonAsciiSubject(
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Raw padded bytes.
    pub fn as_bytes(&self) -> &[u8; SUBJECT_LEN] {
        &self.0
    }

    /// Full padded text, trailing spaces included.
    pub fn as_padded_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Text with the padding removed.
    pub fn trimmed(&self) -> &str {
        self.as_padded_str().trim_end_matches(' ')
    }
}

impl TryFrom<String> for Subject {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_ascii(value.trim_end_matches(' '))
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.trimmed().to_string()
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject({:?})", self.as_padded_str())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trimmed())
    }
}
