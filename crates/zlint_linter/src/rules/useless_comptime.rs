use zlint_diagnostics::Violation;
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A `comptime { }` block with an empty body, evaluating nothing.
pub struct UselessComptimeViolation;

impl Violation for UselessComptimeViolation {
    fn message(&self) -> String {
        "`comptime` block is empty".to_string()
    }

    fn help(&self) -> Option<String> {
        Some("remove the block, it has no effect".to_string())
    }
}

pub struct UselessComptime;

impl LintRule for UselessComptime {
    fn rule(&self) -> Rule {
        Rule::UselessComptime
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::Comptime { body } = ctx.ast().kind(node) else {
            return;
        };
        let NodeKind::Block { stmts } = ctx.ast().kind(*body) else {
            return;
        };
        if !stmts.is_empty() {
            return;
        }
        ctx.diagnostic_fix(
            &UselessComptimeViolation,
            ctx.span_node(node),
            zlint_diagnostics::Fix::deletion(ctx.span_node(node)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_an_empty_comptime_block() {
        let diagnostics = lint_one("comptime {}\n", Rule::UselessComptime);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "useless-comptime");
    }

    #[test]
    fn does_not_flag_a_comptime_block_with_a_statement() {
        let diagnostics = lint_one("comptime {\n    @compileLog(\"x\");\n}\n", Rule::UselessComptime);
        assert!(diagnostics.is_empty());
    }
}
