use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Network address of an ecosystem component (`0x` + 40 hex digits).
///
/// Addresses are normalized to lowercase on parse, so two spellings of the
/// same address compare equal. The all-zero address is rejected: a component
/// that points at it has no peer at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parses and normalizes an address.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Regex::new(r"^0[xX][0-9a-fA-F]{40}$")
            .expect("invalid regex")
            .is_match(&s)
        {
            return Err(ValidationError::PatternMismatch {
                field: "Address",
                value: s,
            });
        }
        let normalized = s.to_ascii_lowercase();
        if normalized == NULL_ADDRESS {
            return Err(ValidationError::NullAddress);
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case() {
        let upper = Address::parse("0xABCDEF0123456789ABCDEF0123456789ABCDEF01").unwrap();
        let lower = Address::parse("0xabcdef0123456789abcdef0123456789abcdef01").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(matches!(
            Address::parse("0x1234"),
            Err(ValidationError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(Address::parse("abcdef0123456789abcdef0123456789abcdef0123").is_err());
    }

    #[test]
    fn parse_rejects_null_address() {
        assert_eq!(Address::parse(NULL_ADDRESS), Err(ValidationError::NullAddress));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Address, _> =
            serde_json::from_str("\"0x1111111111111111111111111111111111111111\"");
        assert!(ok.is_ok());
        let bad: Result<Address, _> = serde_json::from_str("\"not-an-address\"");
        assert!(bad.is_err());
    }
}
