//! Use cases
//!
//! Use cases orchestrate the generator: render artifacts and hand them to a
//! store.

mod generate_artifacts;

pub use generate_artifacts::{
    ArtifactReport, ArtifactStatus, GenerateArtifacts, GenerateMode, GenerationSummary,
};
