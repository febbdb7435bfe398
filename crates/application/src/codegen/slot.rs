//! Per-slot naming record and variant plan.
//!
//! A [`Variant`] builds one [`Slot`] per argument position exactly once.
//! Fragments never format a slot number themselves; they read the names
//! off the slot record, so the field, parameter, initializer and accessor
//! for slot `j` always refer to the same `j`.

use aritygen_domain::{ArityIndex, SlotIndex, expand};

/// Every identifier the templates derive for one argument slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    index: SlotIndex,
    /// Equation (or equation expression) type parameter, `Ej`.
    pub eqn_type: String,
    /// Target type parameter, `Tj`.
    pub target_type: String,
    /// Target member and parameter, `targetj`.
    pub target: String,
    /// Getter member and parameter, `getterj`.
    pub getter: String,
    /// Getter alias, `getter_typej`.
    pub getter_type: String,
    /// Owned stencil field member, `stFieldj`.
    pub st_field: String,
    /// Stencil field alias, `st_field_typej`.
    pub st_field_type: String,
    /// Equation functor parameter of the composing function, `funcj`.
    pub func: String,
    /// Equation expression member, `eqn_exprj`.
    pub eqn_expr: String,
    /// Equation expression constructor parameter, `ej`.
    pub expr_param: String,
    /// Target constructor parameter, `tj`.
    pub target_param: String,
    /// Operand type parameter, `Argj`.
    pub arg_type: String,
    /// Operand member and parameter, `argj`.
    pub arg: String,
    /// Equation functor type parameter, `Fj`.
    pub func_type: String,
    /// Equation functor parameter, `fj`.
    pub func_param: String,
}

impl Slot {
    /// Derives the naming record for slot `index`.
    #[must_use]
    pub fn new(index: SlotIndex) -> Self {
        let j = index.get();
        Self {
            index,
            eqn_type: format!("E{j}"),
            target_type: format!("T{j}"),
            target: format!("target{j}"),
            getter: format!("getter{j}"),
            getter_type: format!("getter_type{j}"),
            st_field: format!("stField{j}"),
            st_field_type: format!("st_field_type{j}"),
            func: format!("func{j}"),
            eqn_expr: format!("eqn_expr{j}"),
            expr_param: format!("e{j}"),
            target_param: format!("t{j}"),
            arg_type: format!("Arg{j}"),
            arg: format!("arg{j}"),
            func_type: format!("F{j}"),
            func_param: format!("f{j}"),
        }
    }

    /// Selector value of the accessor branch that returns this slot.
    #[must_use]
    pub const fn selector(&self) -> u32 {
        self.index.get()
    }

    /// Zero-based position, for array subscripts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.index.offset()
    }
}

/// One arity of a family: its slots, built once and shared by every facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    arity: ArityIndex,
    slots: Vec<Slot>,
}

impl Variant {
    /// Plans the variant with `arity` slots.
    #[must_use]
    pub fn new(arity: ArityIndex) -> Self {
        Self {
            arity,
            slots: arity.slots().iter().map(Slot::new).collect(),
        }
    }

    /// Arity of the variant.
    #[must_use]
    pub const fn arity(&self) -> ArityIndex {
        self.arity
    }

    /// Number of slots.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.arity.get()
    }

    /// Slot records, in order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The first slot. Every variant has at least one.
    #[must_use]
    pub fn first_slot(&self) -> &Slot {
        &self.slots[0]
    }

    /// Renders one facet: `rule` applied to every slot, joined by `separator`.
    pub fn facet<F>(&self, separator: &str, rule: F) -> String
    where
        F: Fn(&Slot) -> String,
    {
        expand(self.arity.slots(), separator, |j| rule(&self.slots[j.offset()]))
    }
}
