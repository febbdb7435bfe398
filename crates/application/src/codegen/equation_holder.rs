//! `EqnHolder` family: equation getters bound to their target fields.

use aritygen_domain::{ArityIndex, Family};

use super::emitter::{FamilyEmitter, LIST, MEMBERS, STATEMENTS, selector_guard};
use super::slot::Variant;

const PREAMBLE: &str = r#"
#ifndef OPFLOW_EQUATIONHOLDER_HPP
#define OPFLOW_EQUATIONHOLDER_HPP

#include "Core/Meta.hpp"
#include "DataStructures/StencilPad.hpp"
#include <functional>
#include <memory>
#include <unordered_map>

namespace OpFlow {
    template <typename... E>
    struct EqnHolder;
"#;

const FOOTER: &str = r"
} // namespace OpFlow

#endif // OPFLOW_EQUATIONHOLDER_HPP
";

/// Associative structure a target's stencil field is keyed with.
///
/// A single equation has a single stencil key, for which the library uses a
/// degenerate placeholder that is not interchangeable with a real map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilMap {
    /// `std::unordered_map`, for systems of two or more equations.
    Unordered,
    /// `DS::fake_map`, for a single equation.
    Fake,
}

impl StencilMap {
    /// Map used by the variant of the given arity.
    #[must_use]
    pub const fn for_arity(arity: ArityIndex) -> Self {
        if arity.is_unary() {
            Self::Fake
        } else {
            Self::Unordered
        }
    }

    /// C++ template name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unordered => "std::unordered_map",
            Self::Fake => "DS::fake_map",
        }
    }
}

/// Emits `EqnHolder<E1.., T1..>` and `makeEqnHolder` for every arity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquationHolderEmitter;

impl FamilyEmitter for EquationHolderEmitter {
    fn family(&self) -> Family {
        Family::EquationHolder
    }

    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn variant(&self, v: &Variant) -> String {
        let map = StencilMap::for_arity(v.arity());
        let mut code = String::new();

        code.push('\n');
        code.push_str(&format!(
            "    template <{}, {}>\n",
            eqn_type_params(v),
            target_type_params(v)
        ));
        code.push_str(&format!(
            "    struct EqnHolder<{}, {}> {{\n",
            eqn_type_args(v),
            target_type_args(v)
        ));
        code.push_str(&format!("        constexpr static int size = {};\n", v.size()));
        code.push_str(&format!("        {}\n", target_fields(v)));
        code.push_str(&format!("        {}\n", stencil_field_aliases(v, map)));
        code.push_str(&format!("        {}\n", getter_aliases(v)));
        code.push_str(&format!("        {}\n", stencil_field_members(v)));
        code.push_str(&format!("        {}\n", getter_members(v)));
        code.push('\n');
        code.push_str(&format!(
            "        EqnHolder({}, {}) : {}, {} {{\n",
            getter_params(v),
            target_params(v),
            getter_initializers(v),
            target_initializers(v)
        ));
        code.push_str(&format!("            {}\n", stencil_field_inits(v, map)));
        code.push_str("        }\n");
        code.push('\n');
        code.push_str("        template <int i>\n");
        code.push_str("        auto getEqnExpr() const {\n");
        code.push_str(&format!("            {}\n", selector_guard("EqnHolder", v.size())));
        code.push_str(&format!("            {}\n", eqn_expr_branches(v)));
        code.push_str("        }\n");
        code.push('\n');
        code.push_str("        template <int i>\n");
        code.push_str("        auto getTarget() {\n");
        code.push_str(&format!("            {}\n", selector_guard("EqnHolder", v.size())));
        code.push_str(&format!("            {}\n", target_branches(v)));
        code.push_str("        }\n");
        code.push_str("    };\n");
        code.push('\n');
        code.push_str(&format!(
            "    auto makeEqnHolder({}, {}) {{\n",
            make_func_params(v),
            make_target_params(v)
        ));
        code.push_str(&format!(
            "        return EqnHolder<{}, {}>({}, {});\n",
            make_eqn_types(v, map),
            make_target_types(v),
            v.facet(LIST, |s| s.func.clone()),
            v.facet(LIST, |s| s.target.clone())
        ));
        code.push_str("    }\n");
        code
    }

    fn footer(&self) -> &'static str {
        FOOTER
    }
}

fn eqn_type_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("typename {}", s.eqn_type))
}

fn target_type_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("typename {}", s.target_type))
}

fn eqn_type_args(v: &Variant) -> String {
    v.facet(LIST, |s| s.eqn_type.clone())
}

fn target_type_args(v: &Variant) -> String {
    v.facet(LIST, |s| s.target_type.clone())
}

pub(crate) fn target_fields(v: &Variant) -> String {
    v.facet(MEMBERS, |s| format!("{}* {};", s.target_type, s.target))
}

pub(crate) fn stencil_field_aliases(v: &Variant, map: StencilMap) -> String {
    v.facet(MEMBERS, |s| {
        format!(
            "using {} = Meta::RealType<decltype({}->template getStencilField<{}>())>;",
            s.st_field_type,
            s.target,
            map.as_str()
        )
    })
}

/// Every getter takes every stencil field, so the inner facet spans all slots.
pub(crate) fn getter_aliases(v: &Variant) -> String {
    let fields = v.facet(LIST, |k| format!("{}&", k.st_field_type));
    v.facet(MEMBERS, |s| {
        format!(
            "using {} = std::function<{}({fields})>;",
            s.getter_type, s.eqn_type
        )
    })
}

fn stencil_field_members(v: &Variant) -> String {
    v.facet(MEMBERS, |s| {
        format!("std::unique_ptr<{}> {};", s.st_field_type, s.st_field)
    })
}

fn getter_members(v: &Variant) -> String {
    v.facet(MEMBERS, |s| format!("{} {};", s.getter_type, s.getter))
}

pub(crate) fn getter_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{} {}", s.getter_type, s.getter))
}

pub(crate) fn target_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}& {}", s.target_type, s.target))
}

pub(crate) fn getter_initializers(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}({})", s.getter, s.getter))
}

pub(crate) fn target_initializers(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}(&{})", s.target, s.target))
}

pub(crate) fn stencil_field_inits(v: &Variant, map: StencilMap) -> String {
    v.facet(STATEMENTS, |s| {
        format!(
            "{} = std::make_unique<{}>(this->{}->template getStencilField<{}>({}));",
            s.st_field,
            s.st_field_type,
            s.target,
            map.as_str(),
            s.selector()
        )
    })
}

pub(crate) fn eqn_expr_branches(v: &Variant) -> String {
    let fields = v.facet(LIST, |k| format!("*{}", k.st_field));
    v.facet(STATEMENTS, |s| {
        format!(
            "if constexpr (i == {}) {{ auto eqn = {}({fields}); auto t = eqn.lhs - eqn.rhs; t.prepare(); return t; }}",
            s.selector(),
            s.getter
        )
    })
}

pub(crate) fn target_branches(v: &Variant) -> String {
    v.facet(STATEMENTS, |s| {
        format!("if constexpr (i == {}) return {};", s.selector(), s.target)
    })
}

fn make_func_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("auto&& {}", s.func))
}

fn make_target_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("auto&& {}", s.target))
}

/// Equation type of slot `j` is whatever `funcj` returns for all stencil fields.
fn make_eqn_types(v: &Variant, map: StencilMap) -> String {
    let fields = v.facet(LIST, |k| {
        format!("{}.template getStencilField<{}>()", k.target, map.as_str())
    });
    v.facet(LIST, |s| {
        format!("Meta::RealType<decltype({}({fields}))>", s.func)
    })
}

fn make_target_types(v: &Variant) -> String {
    v.facet(LIST, |s| format!("Meta::RealType<decltype({})>", s.target))
}
