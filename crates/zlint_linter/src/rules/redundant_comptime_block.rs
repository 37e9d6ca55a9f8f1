use zlint_diagnostics::{Fix, Violation};
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A `comptime { comptime { ... } }` block whose entire body is itself a
/// single nested `comptime` block — the outer one adds nothing.
pub struct RedundantComptimeBlockViolation;

impl Violation for RedundantComptimeBlockViolation {
    fn message(&self) -> String {
        "`comptime` block whose only statement is itself a `comptime` block".to_string()
    }

    fn help(&self) -> Option<String> {
        Some("the outer block is redundant; keep only the inner one".to_string())
    }
}

pub struct RedundantComptimeBlock;

impl LintRule for RedundantComptimeBlock {
    fn rule(&self) -> Rule {
        Rule::RedundantComptimeBlock
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::Comptime { body } = ctx.ast().kind(node) else {
            return;
        };
        let NodeKind::Block { stmts } = ctx.ast().kind(*body) else {
            return;
        };
        let [only] = stmts.as_slice() else {
            return;
        };
        let NodeKind::ExprStmt { expr } = ctx.ast().kind(*only) else {
            return;
        };
        if !matches!(ctx.ast().kind(*expr), NodeKind::Comptime { .. }) {
            return;
        }
        let outer_span = ctx.span_node(node);
        let inner_text = ctx.source().snippet(ctx.span_node(*expr)).to_string();
        let fix = Fix::new(outer_span, inner_text);
        ctx.diagnostic_fix(&RedundantComptimeBlockViolation, outer_span, fix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_a_comptime_block_wrapping_only_another_comptime_block() {
        let diagnostics = lint_one(
            "comptime {\n    comptime {\n        @compileLog(\"x\");\n    }\n}\n",
            Rule::RedundantComptimeBlock,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "redundant-comptime-block");
        assert!(diagnostics[0].fix.is_some());
    }

    #[test]
    fn does_not_flag_a_comptime_block_with_other_statements() {
        let diagnostics = lint_one(
            "comptime {\n    comptime {\n        @compileLog(\"x\");\n    }\n    @compileLog(\"y\");\n}\n",
            Rule::RedundantComptimeBlock,
        );
        assert!(diagnostics.is_empty());
    }
}
