//! Aritygen Domain - Core generator types
//!
//! This crate defines the vocabulary of the generator: arity and slot
//! indices, the index range expander, declaration families and the
//! configuration model. All types here are pure Rust with no I/O.

pub mod arity;
pub mod artifact;
pub mod config;
pub mod error;
pub mod expand;
pub mod family;

pub use arity::{ArityIndex, MaxArity, SlotIndex, SlotRange};
pub use artifact::GeneratedArtifact;
pub use config::{ArtifactTarget, FamilyConfig, GeneratorConfig};
pub use error::{DomainError, DomainResult};
pub use expand::{expand, expand_range};
pub use family::{Family, FamilySelection};
