//! Application error types

use std::path::PathBuf;

use aritygen_domain::{DomainError, Family};
use thiserror::Error;

use crate::ports::StoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Configuration failed domain validation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An artifact could not be read or replaced.
    #[error("{family} artifact at {}: {source}", .path.display())]
    Store {
        /// Family whose artifact failed.
        family: Family,
        /// Destination of the artifact.
        path: PathBuf,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },
}

impl ApplicationError {
    /// Family the error is attributed to, if any.
    #[must_use]
    pub const fn family(&self) -> Option<Family> {
        match self {
            Self::Domain(DomainError::InvalidFamilyConfig { family, .. })
            | Self::Store { family, .. } => Some(*family),
            Self::Domain(_) => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
