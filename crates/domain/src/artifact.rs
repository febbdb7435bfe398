//! Generated artifacts.

use crate::family::Family;

/// The complete text of one family's output file.
///
/// Built fresh on every run: shared header, family preamble, fixed
/// fragments, one variant per arity in increasing order, footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    family: Family,
    max_arity: u32,
    variant_count: usize,
    text: String,
}

impl GeneratedArtifact {
    /// Creates an artifact from its rendered text.
    #[must_use]
    pub fn new(family: Family, max_arity: u32, variant_count: usize, text: impl Into<String>) -> Self {
        Self {
            family,
            max_arity,
            variant_count,
            text: text.into(),
        }
    }

    /// Family this artifact belongs to.
    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    /// Upper arity bound it was generated with.
    #[must_use]
    pub const fn max_arity(&self) -> u32 {
        self.max_arity
    }

    /// Number of generated variants. Zero for a degenerate bound.
    #[must_use]
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Full file contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
