//! Source generation for the arity-indexed declaration families.
//!
//! Each family module holds the fragment templates for its facets and the
//! [`FamilyEmitter`] that splices them into one declaration per arity.

mod emitter;
mod equation_holder;
mod expression;
mod slot;
mod stencil_holder;
mod unified_solve;

pub use emitter::{FamilyEmitter, GENERATED_HEADER, emit_artifact, emitter_for, generate_family};
pub use equation_holder::{EquationHolderEmitter, StencilMap};
pub use expression::ExpressionEmitter;
pub use slot::{Slot, Variant};
pub use stencil_holder::StencilHolderEmitter;
pub use unified_solve::UnifiedSolveEmitter;
