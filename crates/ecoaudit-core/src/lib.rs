//! Structural integrity and daylight-saving coordination for an
//! eight-component trust ecosystem.
//!
//! This crate provides:
//! - The canonical role set and the [`ComponentRegistry`] of addresses
//! - Reference sets as reported by each component and the total
//!   cross-reference check over them ([`verify`])
//! - The daylight-saving state machine and the [`Coordinator`] that is its
//!   only writer
//! - Audit records for Pool's log and the [`AuditSink`] they go to
//! - TOML configuration for registries, reference snapshots and daylight settings
//!
//! Core invariants:
//! - Every component holds the registry address for every role, its own included
//! - Verification reports every discrepancy, ordered by reporter then role
//! - Each transition flips the season exactly once and logs exactly one record
//! - A failed transition changes nothing
//!
#![deny(missing_docs)]

/// Ecosystem configuration files.
pub mod config;
/// Daylight-saving coordinator.
pub mod coordinator;
/// Daylight-saving state machine.
pub mod daylight;
/// Error types for core operations.
pub mod errors;
/// Component roles.
pub mod identity;
/// Audit log records and sinks.
pub mod record;
/// Per-component reference sets.
pub mod reference;
/// Canonical component registry.
pub mod registry;
/// Cross-reference verification.
pub mod verifier;

pub use config::{ConfigError, EcosystemConfig, ReferenceSnapshot};
pub use coordinator::{AccessPolicy, AllowList, Clock, Coordinator, FixedClock, SystemClock};
pub use daylight::{adjust_daylight_saving, DaylightObserver, DaylightState, Season};
pub use errors::CoreError;
pub use identity::{ComponentIdentity, UnknownRole, COMPONENT_COUNT};
pub use record::{
    AuditLogRecord, AuditSink, AuditSubject, MemorySink, RecordError, SinkError, RECORD_WIRE_LEN,
};
pub use reference::{ComponentView, ReferenceSet, ReferenceSets};
pub use registry::{ComponentRegistry, RegistryError};
pub use verifier::{verify, verify_parallel, Discrepancy, DiscrepancyKind, VerificationReport};
