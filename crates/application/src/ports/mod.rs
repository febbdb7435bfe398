//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the generator core and the outside
//! world. Adapters live in the infrastructure layer.

mod artifact_store;

pub use artifact_store::{ArtifactStore, StoreError};
