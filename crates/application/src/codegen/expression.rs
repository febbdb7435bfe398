//! `Expression` family: expression tree nodes over two or more operands.
//!
//! The nullary and unary nodes are hand-written and emitted once as fixed
//! fragments; the generated sequence starts at two operands.

use aritygen_domain::Family;

use super::emitter::{FamilyEmitter, LIST, MEMBERS, OR, STATEMENTS};
use super::slot::Variant;

const PREAMBLE: &str = r#"
#ifndef OPFLOW_EXPRESSION_HPP
#define OPFLOW_EXPRESSION_HPP

#include "Core/Expr/Expr.hpp"
#include "Core/Expr/ExprTrait.hpp"
#include "Core/Operator/Operator.hpp"

namespace OpFlow {
    template <typename Op, ExprType... Args>
    struct Expression;
"#;

/// Nullary node, the `DEFINE_EVAL_OPS` helper macro and the unary node.
pub(crate) const FIXED_NODES: &str = r#"
    template <typename Op>
    requires(!ExprType<Op>) struct Expression<Op> : ResultType<Op>::type {
        friend Expr<Expression<Op>>;
        Expression() = default;

    protected:
        OPFLOW_STRONG_INLINE auto evalAtImpl_final(auto&& i) const {
            OP_STACK_PUSH("Eval {} at {}", this->getName(), i.toString());
            auto ret = Op::eval(OP_PERFECT_FOWD(i));
            OP_STACK_POP;
            return ret;
        }
        OPFLOW_STRONG_INLINE auto evalSafeAtImpl_final(auto&& i) const {
            OP_STACK_PUSH("Eval {} at {}", this->getName(), i.toString());
            auto ret = Op::eval_safe(std::forward<decltype(i)>(i));
            OP_STACK_POP;
            return ret;
        }
        void prepareImpl_final() { Op::prepare(*this); }
        bool containsImpl_final(auto&&...) const { return false; }
    };

#define DEFINE_EVAL_OPS(...)                                                                                 \
    OPFLOW_STRONG_INLINE auto evalAtImpl_final(auto&& i) const {                                             \
        OP_STACK_PUSH("Eval {} at {}", this->getName(), i.toString());                                       \
        auto ret = Op::eval(__VA_ARGS__, OP_PERFECT_FOWD(i));                                                \
        OP_STACK_POP;                                                                                        \
        return ret;                                                                                          \
    }                                                                                                        \
    OPFLOW_STRONG_INLINE auto evalSafeAtImpl_final(auto&& i) const {                                         \
        OP_STACK_PUSH("Eval {} at {}", this->getName(), i.toString());                                       \
        auto ret = Op::eval_safe(__VA_ARGS__, std::forward<decltype(i)>(i));                                 \
        OP_STACK_POP;                                                                                        \
        return ret;                                                                                          \
    }

    template <typename Op, ExprType Arg>
    struct Expression<Op, Arg> : ResultType<Op, Arg>::type {
        friend Expr<Expression<Op, Arg>>;
        explicit Expression(Arg&& arg1) : arg1(OP_PERFECT_FOWD(arg1)) {}
        explicit Expression(Arg& arg1) : arg1(arg1) {}
        Expression(const Expression& e) : ResultType<Op, Arg>::type(e), arg1(e.arg1) {}
        Expression(Expression&& e) noexcept : ResultType<Op, Arg>::type(std::move(e)), arg1(e.arg1) {}

    protected:
        void prepareImpl_final() {
            arg1.prepare();
            Op::prepare(*this);
        }

        bool containsImpl_final(const auto& t) const { return arg1.contains(t); }

        DEFINE_EVAL_OPS(arg1)
    public:
        typename internal::ExprProxy<Arg>::type arg1;
    };
"#;

const FOOTER: &str = r"
    // general exprs
    template <typename Op, typename... Args>
    requires(sizeof...(Args) > 0) auto makeExpression(Args&&... args) {
        return Expression<Op, Meta::RealType<Args>...>(std::forward<Args>(args)...);
    }

    // nullary op exprs
    template <typename Op>
    auto makeExpression() {
        return Expression<Op>();
    }

#undef DEFINE_EVAL_OPS
} // namespace OpFlow

#endif // OPFLOW_EXPRESSION_HPP
";

/// Emits `Expression<Op, Arg1..>` for every operand count from two.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEmitter;

impl FamilyEmitter for ExpressionEmitter {
    fn family(&self) -> Family {
        Family::Expression
    }

    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn fixed_fragments(&self) -> &'static str {
        FIXED_NODES
    }

    fn variant(&self, v: &Variant) -> String {
        let args = arg_types(v);
        let base = format!("ResultType<Op, {args}>::type");
        let copies = copy_initializers(v);
        let mut code = String::new();

        code.push('\n');
        code.push_str(&format!("    template <typename Op, {}>\n", arg_type_params(v)));
        code.push_str(&format!("    struct Expression<Op, {args}> : {base} {{\n"));
        code.push_str(&format!("        friend Expr<Expression<Op, {args}>>;\n"));
        code.push_str(&format!(
            "        explicit Expression({}) : {} {{}}\n",
            forwarding_params(v),
            forwarding_initializers(v)
        ));
        code.push_str(&format!(
            "        Expression(const Expression& e) : {base}(e), {copies} {{}}\n"
        ));
        code.push_str(&format!(
            "        Expression(Expression&& e) noexcept : {base}(std::move(e)), {copies} {{}}\n"
        ));
        code.push('\n');
        code.push_str("    protected:\n");
        code.push_str("        void prepareImpl_final() {\n");
        code.push_str(&format!("            {}\n", prepare_calls(v)));
        code.push_str("            Op::prepare(*this);\n");
        code.push_str("        }\n");
        code.push('\n');
        code.push_str(&format!(
            "        bool containsImpl_final(const auto& t) const {{ return {}; }}\n",
            contains_chain(v)
        ));
        code.push('\n');
        code.push_str(&format!(
            "        DEFINE_EVAL_OPS({})\n",
            v.facet(LIST, |s| s.arg.clone())
        ));
        code.push_str("    public:\n");
        code.push_str(&format!("        {}\n", proxy_members(v)));
        code.push_str("    };\n");
        code
    }

    fn footer(&self) -> &'static str {
        FOOTER
    }
}

fn arg_type_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("typename {}", s.arg_type))
}

fn arg_types(v: &Variant) -> String {
    v.facet(LIST, |s| s.arg_type.clone())
}

pub(crate) fn forwarding_params(v: &Variant) -> String {
    v.facet(LIST, |s| format!("auto&& {}", s.arg))
}

pub(crate) fn forwarding_initializers(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}(OP_PERFECT_FOWD({}))", s.arg, s.arg))
}

pub(crate) fn copy_initializers(v: &Variant) -> String {
    v.facet(LIST, |s| format!("{}(e.{})", s.arg, s.arg))
}

pub(crate) fn prepare_calls(v: &Variant) -> String {
    v.facet(STATEMENTS, |s| format!("{}.prepare();", s.arg))
}

pub(crate) fn contains_chain(v: &Variant) -> String {
    v.facet(OR, |s| format!("{}.contains(t)", s.arg))
}

pub(crate) fn proxy_members(v: &Variant) -> String {
    v.facet(MEMBERS, |s| {
        format!("typename internal::ExprProxy<{}>::type {};", s.arg_type, s.arg)
    })
}
