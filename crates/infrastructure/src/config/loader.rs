//! Layered configuration loading.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, `ARITYGEN_*`
//! environment variables. Nested keys use `__` in variable names, e.g.
//! `ARITYGEN_EXPRESSION__MAX_ARITY=24`.

use std::path::PathBuf;

use aritygen_domain::{DomainError, Family, FamilySelection, GeneratorConfig};
use config::{Config, Environment, File, FileFormat, ValueKind};
use tracing::debug;

/// File looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "aritygen.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ARITYGEN";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly named configuration file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A maximum arity was given as a fractional number.
    #[error("{key} must be an integer, got {value}")]
    NotAnInteger {
        /// Configuration key.
        key: String,
        /// Offending value.
        value: f64,
    },

    /// Parsing or merging the sources failed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was well-formed but invalid.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Builds a [`GeneratorConfig`] from defaults, file and environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    use_env: bool,
    env_source: Option<config::Map<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the optional default file and the process environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            file: None,
            use_env: true,
            env_source: None,
        }
    }

    /// Reads `path` instead of the default file. The file must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Reads variables from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Ignores environment variables.
    #[must_use]
    pub const fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named file is missing, a source cannot be
    /// parsed, an arity is not an integer, or any family entry is invalid.
    pub fn load(&self) -> Result<GeneratorConfig, ConfigError> {
        let mut builder = Config::builder().set_default("output_dir", ".")?;
        for family in Family::all() {
            let key = family.config_key();
            builder = builder
                .set_default(
                    format!("{key}.max_arity"),
                    i64::from(family.default_max_arity()),
                )?
                .set_default(format!("{key}.destination"), family.default_file_name())?;
        }

        let (file, required) = match &self.file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::MissingFile(path.clone()));
                }
                (path.clone(), true)
            }
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        builder = builder.add_source(
            File::from(file.as_path())
                .format(FileFormat::Toml)
                .required(required),
        );

        if self.use_env {
            let vars = match &self.env_source {
                Some(vars) => known_vars(vars.clone()),
                None => known_vars(std::env::vars_os().filter_map(|(key, value)| {
                    Some((key.into_string().ok()?, value.into_string().ok()?))
                })),
            };
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            );
        }

        let merged = builder.build()?;
        for family in Family::all() {
            ensure_integer(&merged, &format!("{}.max_arity", family.config_key()))?;
        }
        let config: GeneratorConfig = merged.try_deserialize()?;
        config.targets(&FamilySelection::All)?;

        debug!(
            file = %file.display(),
            output_dir = %config.output_dir.display(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Configuration key an `ARITYGEN_*` variable maps to, if any.
fn env_key(var: &str) -> Option<String> {
    let head = var.get(..ENV_PREFIX.len())?;
    let rest = var[ENV_PREFIX.len()..].strip_prefix('_')?;
    head.eq_ignore_ascii_case(ENV_PREFIX)
        .then(|| rest.to_ascii_lowercase().replace("__", "."))
}

fn is_known_key(key: &str) -> bool {
    key == "output_dir"
        || Family::all().iter().any(|family| {
            key.strip_prefix(family.config_key())
                .is_some_and(|field| field == ".max_arity" || field == ".destination")
        })
}

/// Keeps the variables that name a configuration key.
///
/// The configuration structs reject unknown keys so that typos in the file
/// are reported; unrelated `ARITYGEN_*` variables are skipped here instead.
fn known_vars<I>(vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter(|(var, _)| match env_key(var) {
            Some(key) if is_known_key(&key) => true,
            Some(_) => {
                debug!(variable = %var, "ignoring unrecognised environment variable");
                false
            }
            None => false,
        })
        .collect()
}

/// Rejects fractional arities, which would otherwise be rounded silently.
fn ensure_integer(config: &Config, key: &str) -> Result<(), ConfigError> {
    match config.get::<config::Value>(key) {
        Ok(value) => match value.kind {
            ValueKind::Float(f) => Err(ConfigError::NotAnInteger {
                key: key.to_string(),
                value: f,
            }),
            _ => Ok(()),
        },
        Err(_) => Ok(()),
    }
}
