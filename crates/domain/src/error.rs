//! Domain error types

use thiserror::Error;

use crate::family::Family;

/// Domain-level errors raised while validating generator inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A maximum arity was zero, negative or too large.
    #[error("invalid maximum arity {0}: must be between 1 and {max}", max = crate::arity::MaxArity::LIMIT)]
    InvalidMaxArity(i64),

    /// An arity index of zero was requested.
    #[error("invalid arity {0}: a variant carries at least one slot")]
    InvalidArity(u32),

    /// A slot range was empty, reversed or started at zero.
    #[error("invalid slot range [{start}, {end}]: expected 1 <= start <= end")]
    InvalidSlotRange {
        /// First slot of the requested range.
        start: u32,
        /// Last slot of the requested range.
        end: u32,
    },

    /// A family name could not be recognised.
    #[error("unknown family: {0}")]
    UnknownFamily(String),

    /// A family's configuration entry is invalid.
    #[error("invalid configuration for {family}: {message}")]
    InvalidFamilyConfig {
        /// The family whose entry failed validation.
        family: Family,
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
