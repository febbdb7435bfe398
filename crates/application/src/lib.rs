//! Aritygen Application - Fragment templates, emitters and use cases
//!
//! This crate turns a family and a maximum arity into the text of one
//! artifact, and orchestrates writing or checking artifacts through the
//! [`ports::ArtifactStore`] port.

pub mod codegen;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use codegen::{FamilyEmitter, emit_artifact, emitter_for, generate_family};
pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{
    ArtifactReport, ArtifactStatus, GenerateArtifacts, GenerateMode, GenerationSummary,
};
