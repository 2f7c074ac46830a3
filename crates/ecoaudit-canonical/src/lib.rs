//! Canonical primitives shared by every ecoaudit crate.
//!
//! Everything that is compared across components (addresses) or written to
//! the audit log wire format (subjects, record digests) lives in this crate.
//!
#![deny(missing_docs)]

/// Domain-separated record digests.
pub mod digest;
/// Component addresses.
pub mod identifiers;
/// Fixed-width, space-padded audit subjects.
pub mod subject;
/// Validation helpers used by canonical types.
pub mod validation;

pub use digest::{RecordDigest, RECORD_DOMAIN_SEPARATOR};
pub use identifiers::Address;
pub use subject::{Subject, SUBJECT_LEN};
pub use validation::ValidationError;
