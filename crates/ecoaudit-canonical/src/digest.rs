use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};

/// Domain separator for record digests: `b"ecoaudit:record:v1\0"`.
pub const RECORD_DOMAIN_SEPARATOR: &[u8] = b"ecoaudit:record:v1\0";

/// SHA-256 digest of an audit record, encoded as base64url without padding.
///
/// Formula: `sha256(domain_separator || wire_bytes)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDigest(String);

impl RecordDigest {
    /// Computes the digest of a record's wire bytes.
    pub fn compute(wire_bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(RECORD_DOMAIN_SEPARATOR);
        hasher.update(wire_bytes);
        let hash_bytes = hasher.finalize();
        Self(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes))
    }

    /// Base64url text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
