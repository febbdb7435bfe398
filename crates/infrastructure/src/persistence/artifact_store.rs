//! File-backed artifact store.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use aritygen_application::ports::{ArtifactStore, StoreError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Artifact store on the local file system using `tokio::fs`.
///
/// Writes go to a hidden sibling file which is then renamed over the
/// destination, so a failed write never leaves a truncated artifact.
#[derive(Debug, Clone, Default)]
pub struct TokioArtifactStore;

impl TokioArtifactStore {
    /// Creates a new `TokioArtifactStore`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Sibling path `.<name>.<pid>.tmp` in the destination's directory.
fn temp_path(path: &Path, file_name: &OsStr) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(file_name);
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn map_io(e: io::Error, path: &Path) -> StoreError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        StoreError::PermissionDenied(path.to_path_buf())
    } else {
        StoreError::Io(e)
    }
}

async fn write_synced(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await
}

impl ArtifactStore for TokioArtifactStore {
    async fn read_artifact(&self, path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io(e, path)),
        }
    }

    async fn replace_artifact(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| StoreError::InvalidPath(path.display().to_string()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io(e, parent))?;
        }

        let temp = temp_path(path, file_name);
        let written = match write_synced(&temp, contents).await {
            Ok(()) => fs::rename(&temp, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&temp).await;
            return Err(map_io(e, path));
        }

        debug!(path = %path.display(), bytes = contents.len(), "artifact replaced");
        Ok(())
    }
}
