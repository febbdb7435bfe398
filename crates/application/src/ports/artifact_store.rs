//! Artifact storage port.

use std::path::{Path, PathBuf};

/// Error type for artifact storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Permission denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The destination cannot hold a file.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where generated artifacts are read from and written to.
pub trait ArtifactStore: Send + Sync {
    /// Reads the current raw bytes of an artifact.
    ///
    /// Returns `None` when nothing exists at `path`. The bytes need not be
    /// valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read_artifact(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Replaces an artifact with `contents` as a whole.
    ///
    /// Either the new contents are fully in place afterwards, or the
    /// previous contents are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be written.
    fn replace_artifact(
        &self,
        path: &Path,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
