//! Generator configuration model.
//!
//! The raw shape mirrors the configuration file. Values are kept loose
//! (`i64` arities) so that validation reports a precise
//! [`DomainError`] instead of a deserialisation failure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arity::MaxArity;
use crate::error::{DomainError, DomainResult};
use crate::family::{Family, FamilySelection};

/// Per-family configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyConfig {
    /// Largest arity to emit.
    pub max_arity: i64,
    /// Output file. Relative paths are resolved against the output directory.
    pub destination: PathBuf,
}

impl FamilyConfig {
    /// Built-in entry for a family.
    #[must_use]
    pub fn default_for(family: Family) -> Self {
        Self {
            max_arity: i64::from(family.default_max_arity()),
            destination: PathBuf::from(family.default_file_name()),
        }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Base directory for relative destinations.
    pub output_dir: PathBuf,
    /// `EqnHolder` family.
    pub equation_holder: FamilyConfig,
    /// `Expression` family.
    pub expression: FamilyConfig,
    /// `StencilHolder` family.
    pub stencil_holder: FamilyConfig,
    /// `SolveEqns` family.
    pub unified_solve: FamilyConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            equation_holder: FamilyConfig::default_for(Family::EquationHolder),
            expression: FamilyConfig::default_for(Family::Expression),
            stencil_holder: FamilyConfig::default_for(Family::StencilHolder),
            unified_solve: FamilyConfig::default_for(Family::UnifiedSolve),
        }
    }
}

impl GeneratorConfig {
    /// Returns the entry for a family.
    #[must_use]
    pub const fn family(&self, family: Family) -> &FamilyConfig {
        match family {
            Family::EquationHolder => &self.equation_holder,
            Family::Expression => &self.expression,
            Family::StencilHolder => &self.stencil_holder,
            Family::UnifiedSolve => &self.unified_solve,
        }
    }

    /// Returns the mutable entry for a family.
    pub const fn family_mut(&mut self, family: Family) -> &mut FamilyConfig {
        match family {
            Family::EquationHolder => &mut self.equation_holder,
            Family::Expression => &mut self.expression,
            Family::StencilHolder => &mut self.stencil_holder,
            Family::UnifiedSolve => &mut self.unified_solve,
        }
    }

    /// Validates one family's entry and resolves its destination.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFamilyConfig`] for an out-of-range
    /// maximum arity or an empty destination.
    pub fn target(&self, family: Family) -> DomainResult<ArtifactTarget> {
        let entry = self.family(family);
        let max_arity =
            MaxArity::new(entry.max_arity).map_err(|e| DomainError::InvalidFamilyConfig {
                family,
                message: e.to_string(),
            })?;
        if entry.destination.as_os_str().is_empty() {
            return Err(DomainError::InvalidFamilyConfig {
                family,
                message: "destination path is empty".to_string(),
            });
        }
        Ok(ArtifactTarget {
            family,
            max_arity,
            destination: resolve(&self.output_dir, &entry.destination),
        })
    }

    /// Validates every selected family, in emission order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn targets(&self, selection: &FamilySelection) -> DomainResult<Vec<ArtifactTarget>> {
        selection
            .families()
            .into_iter()
            .map(|family| self.target(family))
            .collect()
    }
}

fn resolve(base: &Path, destination: &Path) -> PathBuf {
    if destination.is_absolute() {
        destination.to_path_buf()
    } else {
        base.join(destination)
    }
}

/// A validated request to generate one family's artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTarget {
    /// Family to emit.
    pub family: Family,
    /// Upper arity bound.
    pub max_arity: MaxArity,
    /// Resolved output path.
    pub destination: PathBuf,
}
