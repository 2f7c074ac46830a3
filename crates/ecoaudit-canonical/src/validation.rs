use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// The all-zero address was supplied where a component address is required.
    #[error("null address is not a valid component address")]
    NullAddress,
    /// Subject does not fit the fixed-width field.
    #[error("subject '{value}' is {len} bytes, maximum is {max}")]
    SubjectTooLong {
        /// Offending value.
        value: String,
        /// Byte length of the value.
        len: usize,
        /// Field width.
        max: usize,
    },
    /// Subject contains bytes outside printable ASCII.
    #[error("subject '{0}' is not printable ASCII")]
    NonAsciiSubject(String),
}
