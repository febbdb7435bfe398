//! File system persistence adapters.

mod artifact_store;

pub use artifact_store::TokioArtifactStore;
