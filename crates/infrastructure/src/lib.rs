//! Aritygen Infrastructure - Adapters and implementations
//!
//! This crate provides the file system artifact store and the layered
//! configuration loader.

pub mod config;
pub mod persistence;

pub use config::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use persistence::TokioArtifactStore;
