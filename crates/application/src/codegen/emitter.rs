//! Declaration-family emitters.

use aritygen_domain::{Family, GeneratedArtifact};
use tracing::debug;

use super::equation_holder::EquationHolderEmitter;
use super::expression::ExpressionEmitter;
use super::slot::Variant;
use super::stencil_holder::StencilHolderEmitter;
use super::unified_solve::UnifiedSolveEmitter;

/// Banner opening every generated file.
pub const GENERATED_HEADER: &str = "\
//  ----------------------------------------------------------------------------
//
//  Copyright (c) 2019 - 2022 by the OpFlow developers
//
//  This file is part of OpFlow.
//
//  OpFlow is free software and is distributed under the MPL v2.0 license.
//  The full text of the license can be found in the file LICENSE at the top
//  level directory of OpFlow.
//
//  ----------------------------------------------------------------------------
//  Note: This file is generated by aritygen. Modify the generator rather than
//        this file if you need to.
//  ----------------------------------------------------------------------------
";

/// Separator for parameter, argument and initializer lists.
pub(crate) const LIST: &str = ", ";
/// Separator for boolean accumulation.
pub(crate) const OR: &str = " || ";
/// Separator for member declarations inside a namespace-level struct.
pub(crate) const MEMBERS: &str = "\n        ";
/// Separator for statements inside a member function body.
pub(crate) const STATEMENTS: &str = "\n            ";

/// Renders the text of one family.
///
/// The artifact is laid out as [`GENERATED_HEADER`], [`Self::preamble`],
/// [`Self::fixed_fragments`], one [`Self::variant`] per arity and
/// [`Self::footer`]. Each block after the header starts with a newline and
/// ends with one.
pub trait FamilyEmitter: Send + Sync {
    /// Family rendered by this emitter.
    fn family(&self) -> Family;

    /// Include guard, includes, namespace opening and forward declaration.
    fn preamble(&self) -> &'static str;

    /// Hand-written declarations that sit outside the generated sequence.
    fn fixed_fragments(&self) -> &'static str {
        ""
    }

    /// Declaration for one arity.
    fn variant(&self, variant: &Variant) -> String;

    /// Namespace and include guard closing.
    fn footer(&self) -> &'static str;
}

/// Renders `emitter`'s artifact for arities `lower_bound..=max_arity`.
///
/// A `max_arity` below the family's lower bound yields a well-formed file
/// with no generated variants.
#[must_use]
pub fn emit_artifact(emitter: &dyn FamilyEmitter, max_arity: u32) -> GeneratedArtifact {
    let family = emitter.family();
    let mut text = String::from(GENERATED_HEADER);
    text.push_str(emitter.preamble());
    text.push_str(emitter.fixed_fragments());

    let mut variant_count = 0;
    for arity in family.arities(max_arity) {
        text.push_str(&emitter.variant(&Variant::new(arity)));
        variant_count += 1;
    }
    text.push_str(emitter.footer());

    debug!(
        family = %family,
        lower_bound = family.lower_bound(),
        max_arity,
        variant_count,
        bytes = text.len(),
        "emitted family"
    );
    GeneratedArtifact::new(family, max_arity, variant_count, text)
}

/// Returns the emitter of a family.
#[must_use]
pub fn emitter_for(family: Family) -> &'static dyn FamilyEmitter {
    match family {
        Family::EquationHolder => &EquationHolderEmitter,
        Family::Expression => &ExpressionEmitter,
        Family::StencilHolder => &StencilHolderEmitter,
        Family::UnifiedSolve => &UnifiedSolveEmitter,
    }
}

/// Generates a family's artifact up to `max_arity`.
#[must_use]
pub fn generate_family(family: Family, max_arity: u32) -> GeneratedArtifact {
    emit_artifact(emitter_for(family), max_arity)
}

/// Opening line of an accessor body: rejects selectors outside `[1, size]`
/// at compile time in the consuming library.
pub(crate) fn selector_guard(owner: &str, size: u32) -> String {
    format!("static_assert(i >= 1 && i <= {size}, \"{owner}: selector out of range\");")
}
