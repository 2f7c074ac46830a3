use ecoaudit_canonical::Address;
use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A non-coordinator caller tried to change the daylight state.
    #[error("caller {caller} is not authorized to adjust daylight saving")]
    UnauthorizedTransition {
        /// Rejected caller.
        caller: Address,
    },
    /// The audit record could not be appended; the state was not changed.
    #[error(transparent)]
    LogAppend(#[from] crate::record::SinkError),
    /// Verification found discrepancies; the ecosystem is not live.
    #[error("ecosystem verification found {count} discrepancies")]
    EcosystemInconsistent {
        /// Number of discrepancies.
        count: usize,
    },
    /// Registry construction failed.
    #[error("invalid registry: {0}")]
    Registry(#[from] crate::registry::RegistryError),
    /// Audit record decoding failed.
    #[error("invalid audit record: {0}")]
    Record(#[from] crate::record::RecordError),
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
