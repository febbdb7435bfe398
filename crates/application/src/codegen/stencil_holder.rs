//! `StencilHolder` family: prepared equation expressions with their targets.

use aritygen_domain::Family;

use super::emitter::{FamilyEmitter, LIST, MEMBERS, STATEMENTS, selector_guard};
use super::slot::Variant;

const PREAMBLE: &str = r#"
#ifndef OPFLOW_STENCILHOLDER_HPP
#define OPFLOW_STENCILHOLDER_HPP

#include "Core/Equation/EquationHolder.hpp"
#include "Core/Macros.hpp"
#include "DataStructures/StencilPad.hpp"
#include <array>

namespace OpFlow {
    template <typename... E>
    struct StencilHolder;
"#;

const FOOTER: &str = r"
} // namespace OpFlow

#endif // OPFLOW_STENCILHOLDER_HPP
";

/// Emits `StencilHolder<E1.., T1..>` and `makeStencilHolder` for every arity.
#[derive(Debug, Clone, Copy, Default)]
pub struct StencilHolderEmitter;

impl FamilyEmitter for StencilHolderEmitter {
    fn family(&self) -> Family {
        Family::StencilHolder
    }

    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn variant(&self, v: &Variant) -> String {
        let type_params = format!(
            "{}, {}",
            v.facet(LIST, |s| format!("typename {}", s.eqn_type)),
            v.facet(LIST, |s| format!("typename {}", s.target_type))
        );
        let type_args = format!(
            "{}, {}",
            v.facet(LIST, |s| s.eqn_type.clone()),
            v.facet(LIST, |s| s.target_type.clone())
        );
        let mut code = String::new();

        code.push('\n');
        code.push_str(&format!("    template <{type_params}>\n"));
        code.push_str(&format!("    struct StencilHolder<{type_args}> {{\n"));
        code.push_str(&format!("        {}\n", target_fields(v)));
        code.push_str(&format!("        {}\n", eqn_expr_fields(v)));
        code.push_str(&format!(
            "        using stencil_type = typename internal::ExprTrait<{}>::elem_type;\n",
            v.first_slot().eqn_type
        ));
        code.push_str(&format!(
            "        std::array<stencil_type, {}> comm_stencils;\n",
            v.size()
        ));
        code.push_str(&format!("        constexpr static int size = {};\n", v.size()));
        code.push('\n');
        code.push_str(&format!(
            "        StencilHolder({}, {}) : {}, {} {{ init_comm_stencils(); }}\n",
            eqn_expr_params(v),
            target_params(v),
            eqn_expr_initializers(v),
            target_initializers(v)
        ));
        code.push('\n');
        code.push_str("        void init_comm_stencils() {\n");
        code.push_str(&format!("            {}\n", comm_stencil_inits(v)));
        code.push_str("        }\n");
        code.push('\n');
        code.push_str("        template <int i>\n");
        code.push_str("        auto& getEqnExpr() {\n");
        code.push_str(&format!("            {}\n", selector_guard("StencilHolder", v.size())));
        code.push_str(&format!("            {}\n", eqn_expr_branches(v)));
        code.push_str("        }\n");
        code.push('\n');
        code.push_str("        template <int i>\n");
        code.push_str("        auto getTarget() {\n");
        code.push_str(&format!("            {}\n", selector_guard("StencilHolder", v.size())));
        code.push_str(&format!("            {}\n", target_branches(v)));
        code.push_str("        }\n");
        code.push_str("    };\n");
        code.push('\n');
        code.push_str(&format!("    template <{type_params}>\n"));
        code.push_str(&format!(
            "    auto makeStencilHolder(EqnHolder<{type_args}>& eqn) {{\n"
        ));
        code.push_str(&format!(
            "        return StencilHolder<{}, {}>({}, {});\n",
            forwarded_eqn_types(v),
            v.facet(LIST, |s| s.target_type.clone()),
            forwarded_eqn_exprs(v),
            forwarded_targets(v)
        ));
        code.push_str("    }\n");
        code
    }

    fn footer(&self) -> &'static str {
        FOOTER
    }
}

pub(crate) fn target_fields(v: &Variant) -> String {
    v.facet(MEMBERS, |s| format!("{}* {};", s.target_type, s.target))
}

pub(crate) fn eqn_expr_fields(v: &Variant) -> String {
    v.facet(MEMBERS, |s| format!("{} {};", s.eqn_type, s.eqn_expr))
}

pub(crate) fn eqn_expr_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}&& {}", s.eqn_type, s.expr_param))
}

pub(crate) fn target_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}* {}", s.target_type, s.target_param))
}

pub(crate) fn eqn_expr_initializers(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}(std::move({}))", s.eqn_expr, s.expr_param))
}

pub(crate) fn target_initializers(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}({})", s.target, s.target_param))
}

/// `comm_stencils` is zero-based while slots start at one.
pub(crate) fn comm_stencil_inits(v: &Variant) -> String {
    v.facet(STATEMENTS, |s| {
        format!(
            "comm_stencils[{}] = {}[{}->assignableRange.center()];",
            s.offset(),
            s.eqn_expr,
            s.target
        )
    })
}

pub(crate) fn eqn_expr_branches(v: &Variant) -> String {
    v.facet(STATEMENTS, |s| {
        format!("if constexpr (i == {}) return {};", s.selector(), s.eqn_expr)
    })
}

pub(crate) fn target_branches(v: &Variant) -> String {
    v.facet(STATEMENTS, |s| {
        format!("if constexpr (i == {}) return {};", s.selector(), s.target)
    })
}

pub(crate) fn forwarded_eqn_types(v: &Variant) -> String {
    v.facet(LIST, |s| {
        format!(
            "Meta::RealType<decltype(eqn.template getEqnExpr<{}>())>",
            s.selector()
        )
    })
}

pub(crate) fn forwarded_eqn_exprs(v: &Variant) -> String {
    v.facet(LIST, |s| format!("eqn.template getEqnExpr<{}>()", s.selector()))
}

pub(crate) fn forwarded_targets(v: &Variant) -> String {
    v.facet(LIST, |s| format!("eqn.template getTarget<{}>()", s.selector()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codegen::emitter::generate_family;
    use aritygen_domain::ArityIndex;
    use pretty_assertions::assert_eq;

    fn variant(i: u32) -> Variant {
        Variant::new(ArityIndex::new(i).unwrap())
    }

    fn selectors(block: &str) -> Vec<u32> {
        block
            .lines()
            .map(|line| {
                let rest = line.trim().strip_prefix("if constexpr (i == ").unwrap();
                rest[..rest.find(')').unwrap()].parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn unary_holder() {
        let text = StencilHolderEmitter.variant(&variant(1));
        let expected = r#"
    template <typename E1, typename T1>
    struct StencilHolder<E1, T1> {
        T1* target1;
        E1 eqn_expr1;
        using stencil_type = typename internal::ExprTrait<E1>::elem_type;
        std::array<stencil_type, 1> comm_stencils;
        constexpr static int size = 1;

        StencilHolder(E1&& e1, T1* t1) : eqn_expr1(std::move(e1)), target1(t1) { init_comm_stencils(); }

        void init_comm_stencils() {
            comm_stencils[0] = eqn_expr1[target1->assignableRange.center()];
        }

        template <int i>
        auto& getEqnExpr() {
            static_assert(i >= 1 && i <= 1, "StencilHolder: selector out of range");
            if constexpr (i == 1) return eqn_expr1;
        }

        template <int i>
        auto getTarget() {
            static_assert(i >= 1 && i <= 1, "StencilHolder: selector out of range");
            if constexpr (i == 1) return target1;
        }
    };

    template <typename E1, typename T1>
    auto makeStencilHolder(EqnHolder<E1, T1>& eqn) {
        return StencilHolder<Meta::RealType<decltype(eqn.template getEqnExpr<1>())>, T1>(eqn.template getEqnExpr<1>(), eqn.template getTarget<1>());
    }
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn comm_stencils_use_zero_based_positions() {
        let v = variant(3);
        assert_eq!(
            comm_stencil_inits(&v).lines().map(str::trim).collect::<Vec<_>>(),
            vec![
                "comm_stencils[0] = eqn_expr1[target1->assignableRange.center()];",
                "comm_stencils[1] = eqn_expr2[target2->assignableRange.center()];",
                "comm_stencils[2] = eqn_expr3[target3->assignableRange.center()];",
            ]
        );
    }

    #[test]
    fn constructor_pairs_parameters_with_fields() {
        for i in 1..=10 {
            let v = variant(i);
            let params = eqn_expr_params(&v);
            let inits = eqn_expr_initializers(&v);
            let target_params = target_params(&v);
            let target_inits = target_initializers(&v);
            let params: Vec<&str> = params.split(LIST).collect();
            let inits: Vec<&str> = inits.split(LIST).collect();
            let target_params: Vec<&str> = target_params.split(LIST).collect();
            let target_inits: Vec<&str> = target_inits.split(LIST).collect();
            assert_eq!(params.len(), i as usize);
            assert_eq!(target_inits.len(), i as usize);
            for j in 1..=i as usize {
                assert_eq!(params[j - 1], format!("E{j}&& e{j}"));
                assert_eq!(inits[j - 1], format!("eqn_expr{j}(std::move(e{j}))"));
                assert_eq!(target_params[j - 1], format!("T{j}* t{j}"));
                assert_eq!(target_inits[j - 1], format!("target{j}(t{j})"));
            }
        }
    }

    #[test]
    fn composing_function_forwards_slot_j_to_slot_j() {
        for i in 1..=10 {
            let v = variant(i);
            let types = forwarded_eqn_types(&v);
            let types: Vec<&str> = types.split(LIST).collect();
            let exprs = forwarded_eqn_exprs(&v);
            let exprs: Vec<&str> = exprs.split(LIST).collect();
            let targets = forwarded_targets(&v);
            let targets: Vec<&str> = targets.split(LIST).collect();
            assert_eq!(types.len(), i as usize);
            assert_eq!(exprs.len(), i as usize);
            assert_eq!(targets.len(), i as usize);
            for j in 1..=i as usize {
                assert_eq!(
                    types[j - 1],
                    format!("Meta::RealType<decltype(eqn.template getEqnExpr<{j}>())>")
                );
                assert_eq!(exprs[j - 1], format!("eqn.template getEqnExpr<{j}>()"));
                assert_eq!(targets[j - 1], format!("eqn.template getTarget<{j}>()"));
            }
        }
    }

    #[test]
    fn comm_stencil_j_reads_expression_and_target_j() {
        for i in 1..=10 {
            let v = variant(i);
            let inits = comm_stencil_inits(&v);
            let inits: Vec<&str> = inits.lines().map(str::trim).collect();
            for j in 1..=i as usize {
                assert_eq!(
                    inits[j - 1],
                    format!(
                        "comm_stencils[{}] = eqn_expr{j}[target{j}->assignableRange.center()];",
                        j - 1
                    )
                );
            }
        }
    }

    #[test]
    fn accessor_selectors_cover_every_slot_once() {
        for i in 1..=10 {
            let v = variant(i);
            let expected: Vec<u32> = (1..=i).collect();
            assert_eq!(selectors(&eqn_expr_branches(&v)), expected);
            assert_eq!(selectors(&target_branches(&v)), expected);
        }
    }

    #[test]
    fn field_counts_equal_arity() {
        for i in 1..=10 {
            let v = variant(i);
            assert_eq!(target_fields(&v).lines().count(), i as usize);
            assert_eq!(eqn_expr_fields(&v).lines().count(), i as usize);
            assert_eq!(comm_stencil_inits(&v).lines().count(), i as usize);
        }
    }

    #[test]
    fn artifact_includes_equation_holder() {
        let artifact = generate_family(Family::StencilHolder, 2);
        assert!(artifact.text().contains("#include \"Core/Equation/EquationHolder.hpp\"\n"));
        assert_eq!(artifact.text().matches("auto makeStencilHolder(").count(), 2);
    }
}
