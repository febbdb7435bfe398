//! `SolveEqns` family: one entry point per size of coupled equation system.
//!
//! The three single-equation `Solve` overloads do not depend on arity and
//! are emitted verbatim once, ahead of the generated sequence.

use aritygen_domain::Family;

use super::emitter::{FamilyEmitter, LIST};
use super::slot::Variant;

const PREAMBLE: &str = r#"
#ifndef OPFLOW_UNIFIEDSOLVE_HPP
#define OPFLOW_UNIFIEDSOLVE_HPP

#include "Core/Equation/AMGCLBackend.hpp"
#include "Core/Equation/CSRMatrixGenerator.hpp"
#include "Core/Equation/EqnSolveHandler.hpp"
#include "Core/Equation/Equation.hpp"
#include "Core/Equation/EquationHolder.hpp"
#include "Core/Equation/HYPREEqnSolveHandler.hpp"
#include "Core/Equation/StencilHolder.hpp"
#include "Core/Solvers/IJ/IJSolver.hpp"
#include "Core/Solvers/SemiStruct/SemiStructSolver.hpp"
#include "Core/Solvers/SemiStruct/SemiStructSolverFAC.hpp"
#include "Core/Solvers/Struct/StructSolver.hpp"
#include "Core/Solvers/Struct/StructSolverBiCGSTAB.hpp"
#include "Core/Solvers/Struct/StructSolverCycRed.hpp"
#include "Core/Solvers/Struct/StructSolverFGMRES.hpp"
#include "Core/Solvers/Struct/StructSolverGMRES.hpp"
#include "Core/Solvers/Struct/StructSolverJacobi.hpp"
#include "Core/Solvers/Struct/StructSolverLGMRES.hpp"
#include "Core/Solvers/Struct/StructSolverNone.hpp"
#include "Core/Solvers/Struct/StructSolverPCG.hpp"
#include "Core/Solvers/Struct/StructSolverPFMG.hpp"
#include "Core/Solvers/Struct/StructSolverPrecond.hpp"
#include "Core/Solvers/Struct/StructSolverSMG.hpp"
#include <vector>

namespace OpFlow {
"#;

/// Structured, semi-structured and IJ single-equation solves.
pub(crate) const FIXED_OVERLOADS: &str = r"
    template <StructSolverType type = StructSolverType::GMRES,
              StructSolverType pType = StructSolverType::None, typename F, StructuredFieldExprType T>
    void Solve(const F& func, T&& target, StructSolverParams<type> params = StructSolverParams<type> {},
               StructSolverParams<pType> precParams = StructSolverParams<pType> {}) {
        auto solver = PrecondStructSolver<type, pType>(params, precParams);
        auto handler = makeEqnSolveHandler(func, target, solver);
        handler->solve();
    }

    template <SemiStructSolverType type = SemiStructSolverType::FAC,
              SemiStructSolverType pType = SemiStructSolverType::None, typename F,
              SemiStructuredFieldExprType T>
    void Solve(const F& func, T&& target,
               SemiStructSolverParams<type> params = SemiStructSolverParams<type> {},
               SemiStructSolverParams<pType> precParams = SemiStructSolverParams<pType> {}) {
        if constexpr (pType != SemiStructSolverType::None) {
            auto solver = PrecondSemiStructSolver<type, pType>(params, precParams);
            auto handler = makeEqnSolveHandler(func, target, solver);
            handler->solve();
        } else {
            auto solver = SemiStructSolver<type>(params);
            auto handler = HYPREEqnSolveHandler<Meta::RealType<F>, Meta::RealType<T>, SemiStructSolver<type>>(
                    func, target, solver);
            handler.solve();
        }
    }

    template <typename S, typename F, FieldExprType T>
    void Solve(F&& func, T&& target, auto&& indexer, IJSolverParams<S> params = IJSolverParams<S> {}) {
        auto handler = makeEqnSolveHandler(func, target, indexer, params);
        handler->solve();
    }
";

/// Body shared by every `SolveEqns` after the holders are built.
const SOLVE_TAIL: &str = r"        auto st_holder = makeStencilHolder(eqn_holder);
        std::vector<bool> pin;
        for (const auto& p : params) pin.push_back(p.pinValue);
        auto mat = CSRMatrixGenerator::generate(st_holder, mapper, pin);
        std::vector<Real> x(mat.rhs.size());
        AMGCLBackend<S, Real>::solve(mat, x, params[0].p, params[0].bp, params[0].verbose);
        Meta::static_for<decltype(st_holder)::size>([&]<int i>(Meta::int_<i>) {
            auto target = eqn_holder.template getTarget<i + 1>();
            rangeFor(target->assignableRange, [&](auto&& k) {
                (*target)[k] = x[mapper(DS::ColoredIndex<Meta::RealType<decltype(k)>> {k, i + 1})];
            });
        });
    }
";

const FOOTER: &str = r"
} // namespace OpFlow

#endif // OPFLOW_UNIFIEDSOLVE_HPP
";

/// Emits `SolveEqns` for every number of coupled equations.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedSolveEmitter;

impl FamilyEmitter for UnifiedSolveEmitter {
    fn family(&self) -> Family {
        Family::UnifiedSolve
    }

    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn fixed_fragments(&self) -> &'static str {
        FIXED_OVERLOADS
    }

    fn variant(&self, v: &Variant) -> String {
        let mut code = String::new();
        code.push('\n');
        code.push_str(&format!(
            "    template <typename S, {}, {}>\n",
            v.facet(LIST, |s| format!("typename {}", s.func_type)),
            v.facet(LIST, |s| format!("typename {}", s.target_type))
        ));
        code.push_str(&format!(
            "    void SolveEqns({}, {}, auto&& mapper, const std::vector<IJSolverParams<S>>& params) {{\n",
            func_params(v),
            target_params(v)
        ));
        code.push_str(&format!(
            "        auto eqn_holder = makeEqnHolder({});\n",
            holder_args(v)
        ));
        code.push_str(SOLVE_TAIL);
        code
    }

    fn footer(&self) -> &'static str {
        FOOTER
    }
}

pub(crate) fn func_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}&& {}", s.func_type, s.func_param))
}

pub(crate) fn target_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}&& {}", s.target_type, s.target_param))
}

/// Functors first, then targets: the order `makeEqnHolder` expects.
pub(crate) fn holder_args(v: &Variant) -> String {
    format!(
        "{}, {}",
        v.facet(LIST, |s| s.func_param.clone()),
        v.facet(LIST, |s| s.target_param.clone())
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codegen::emitter::{GENERATED_HEADER, generate_family};
    use aritygen_domain::ArityIndex;
    use pretty_assertions::assert_eq;

    fn variant(i: u32) -> Variant {
        Variant::new(ArityIndex::new(i).unwrap())
    }

    #[test]
    fn two_equation_signature() {
        let text = UnifiedSolveEmitter.variant(&variant(2));
        assert!(text.starts_with(
            "\n    template <typename S, typename F1, typename F2, typename T1, typename T2>\n    \
             void SolveEqns(F1&& f1, F2&& f2, T1&& t1, T2&& t2, auto&& mapper, \
             const std::vector<IJSolverParams<S>>& params) {\n        \
             auto eqn_holder = makeEqnHolder(f1, f2, t1, t2);\n"
        ));
        assert!(text.ends_with(SOLVE_TAIL));
    }

    #[test]
    fn parameters_and_forwarded_arguments_agree() {
        for i in 1..=10 {
            let v = variant(i);
            let funcs = func_params(&v);
            let targets = target_params(&v);
            let args = holder_args(&v);
            let funcs: Vec<&str> = funcs.split(LIST).collect();
            let targets: Vec<&str> = targets.split(LIST).collect();
            let args: Vec<&str> = args.split(LIST).collect();
            assert_eq!(funcs.len(), i as usize);
            assert_eq!(targets.len(), i as usize);
            assert_eq!(args.len(), 2 * i as usize);
            for j in 1..=i as usize {
                assert_eq!(funcs[j - 1], format!("F{j}&& f{j}"));
                assert_eq!(targets[j - 1], format!("T{j}&& t{j}"));
                assert_eq!(args[j - 1], format!("f{j}"));
                assert_eq!(args[i as usize + j - 1], format!("t{j}"));
            }
        }
    }

    #[test]
    fn fixed_overloads_appear_once_before_generated_sequence() {
        let artifact = generate_family(Family::UnifiedSolve, 3);
        let text = artifact.text();
        assert_eq!(text.matches(FIXED_OVERLOADS).count(), 1);
        assert_eq!(text.matches("    void Solve(").count(), 3);
        let overloads_end = text.find(FIXED_OVERLOADS).unwrap() + FIXED_OVERLOADS.len();
        assert!(text.find("void SolveEqns(").unwrap() >= overloads_end);
        assert_eq!(text.matches("void SolveEqns(").count(), 3);
    }

    #[test]
    fn fixed_overloads_do_not_depend_on_bound() {
        let small = generate_family(Family::UnifiedSolve, 1);
        let large = generate_family(Family::UnifiedSolve, 10);
        assert!(small.text().contains(FIXED_OVERLOADS));
        assert!(large.text().contains(FIXED_OVERLOADS));
    }

    #[test]
    fn degenerate_artifact_keeps_fixed_overloads() {
        let artifact = generate_family(Family::UnifiedSolve, 0);
        assert_eq!(artifact.variant_count(), 0);
        assert_eq!(
            artifact.text(),
            format!("{GENERATED_HEADER}{PREAMBLE}{FIXED_OVERLOADS}{FOOTER}")
        );
        assert!(!artifact.text().contains("SolveEqns"));
    }
}
