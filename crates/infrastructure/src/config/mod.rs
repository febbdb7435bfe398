//! Configuration loading.

mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE, ENV_PREFIX};
