//! Declaration families and family selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arity::ArityIndex;
use crate::error::{DomainError, DomainResult};

/// One generated artifact kind. Each family emits one declaration per arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// `EqnHolder<E..., T...>`: equation getters bound to their targets.
    EquationHolder,
    /// `Expression<Op, Arg...>`: expression tree node over `n` operands.
    Expression,
    /// `StencilHolder<E..., T...>`: prepared equation expressions and targets.
    StencilHolder,
    /// `SolveEqns(f..., t..., mapper, params)`: coupled-system solve entry.
    UnifiedSolve,
}

impl Family {
    /// All families, in emission order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::EquationHolder,
            Self::Expression,
            Self::StencilHolder,
            Self::UnifiedSolve,
        ]
    }

    /// Name of the generated C++ declaration.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::EquationHolder => "EquationHolder",
            Self::Expression => "Expression",
            Self::StencilHolder => "StencilHolder",
            Self::UnifiedSolve => "UnifiedSolve",
        }
    }

    /// Command-line name.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::EquationHolder => "equation-holder",
            Self::Expression => "expression",
            Self::StencilHolder => "stencil-holder",
            Self::UnifiedSolve => "unified-solve",
        }
    }

    /// Configuration table name.
    #[must_use]
    pub const fn config_key(&self) -> &'static str {
        match self {
            Self::EquationHolder => "equation_holder",
            Self::Expression => "expression",
            Self::StencilHolder => "stencil_holder",
            Self::UnifiedSolve => "unified_solve",
        }
    }

    /// Smallest arity emitted by the generated sequence.
    ///
    /// Expression starts at 2: its nullary and unary forms are hand-written.
    #[must_use]
    pub const fn lower_bound(&self) -> u32 {
        match self {
            Self::Expression => 2,
            Self::EquationHolder | Self::StencilHolder | Self::UnifiedSolve => 1,
        }
    }

    /// Default maximum arity.
    #[must_use]
    pub const fn default_max_arity(&self) -> u32 {
        match self {
            Self::Expression => 20,
            Self::EquationHolder | Self::StencilHolder | Self::UnifiedSolve => 10,
        }
    }

    /// Default output file name.
    #[must_use]
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::EquationHolder => "EquationHolder.hpp",
            Self::Expression => "Expression.hpp",
            Self::StencilHolder => "StencilHolder.hpp",
            Self::UnifiedSolve => "UnifiedSolve.hpp",
        }
    }

    /// Arities emitted for an upper bound `max`, in increasing order.
    ///
    /// Empty when `max` is below [`Self::lower_bound`].
    pub fn arities(self, max: u32) -> impl Iterator<Item = ArityIndex> {
        (self.lower_bound()..=max).filter_map(|i| ArityIndex::new(i).ok())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Family {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|family| {
                wanted.eq_ignore_ascii_case(family.key())
                    || wanted.eq_ignore_ascii_case(family.config_key())
                    || wanted.eq_ignore_ascii_case(family.display_name())
            })
            .ok_or_else(|| DomainError::UnknownFamily(s.to_string()))
    }
}

/// Which families a run should generate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FamilySelection {
    /// Every family.
    #[default]
    All,
    /// A subset of families.
    Only(Vec<Family>),
}

impl FamilySelection {
    /// Builds a selection from command-line names.
    ///
    /// No names, or any name equal to `all`, selects every family.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownFamily`] for an unrecognised name.
    pub fn from_names<I, S>(names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut families = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().eq_ignore_ascii_case("all") {
                return Ok(Self::All);
            }
            families.push(name.parse::<Family>()?);
        }
        if families.is_empty() {
            Ok(Self::All)
        } else {
            Ok(Self::Only(families))
        }
    }

    /// Selected families in emission order, without duplicates.
    #[must_use]
    pub fn families(&self) -> Vec<Family> {
        match self {
            Self::All => Family::all().to_vec(),
            Self::Only(chosen) => Family::all()
                .iter()
                .copied()
                .filter(|family| chosen.contains(family))
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lower_bounds_and_defaults() {
        assert_eq!(Family::EquationHolder.lower_bound(), 1);
        assert_eq!(Family::Expression.lower_bound(), 2);
        assert_eq!(Family::Expression.default_max_arity(), 20);
        assert_eq!(Family::UnifiedSolve.default_max_arity(), 10);
    }

    #[test]
    fn arities_are_increasing_from_lower_bound() {
        let arities: Vec<u32> = Family::Expression.arities(5).map(ArityIndex::get).collect();
        assert_eq!(arities, vec![2, 3, 4, 5]);
    }

    #[test]
    fn arities_empty_below_lower_bound() {
        assert_eq!(Family::Expression.arities(1).count(), 0);
        assert_eq!(Family::StencilHolder.arities(0).count(), 0);
    }

    #[test]
    fn parses_every_spelling() {
        assert_eq!("equation-holder".parse::<Family>().unwrap(), Family::EquationHolder);
        assert_eq!("stencil_holder".parse::<Family>().unwrap(), Family::StencilHolder);
        assert_eq!("UnifiedSolve".parse::<Family>().unwrap(), Family::UnifiedSolve);
        assert_eq!(
            "solver".parse::<Family>(),
            Err(DomainError::UnknownFamily("solver".into()))
        );
    }

    #[test]
    fn selection_defaults_to_all() {
        let empty: [&str; 0] = [];
        assert_eq!(FamilySelection::from_names(empty).unwrap(), FamilySelection::All);
        assert_eq!(
            FamilySelection::from_names(["expression", "all"]).unwrap(),
            FamilySelection::All
        );
    }

    #[test]
    fn selection_keeps_emission_order_and_dedups() {
        let selection =
            FamilySelection::from_names(["unified-solve", "expression", "expression"]).unwrap();
        assert_eq!(
            selection.families(),
            vec![Family::Expression, Family::UnifiedSolve]
        );
    }

    #[test]
    fn serde_uses_kebab_case() {
        let family: Family = serde_json::from_str("\"stencil-holder\"").unwrap();
        assert_eq!(family, Family::StencilHolder);
    }
}
