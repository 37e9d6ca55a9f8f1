use zlint_diagnostics::Violation;
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// `return try expr;` — `return` already propagates a function's own error
/// union, so wrapping the returned expression in `try` just unwraps and
/// immediately re-wraps the same error.
pub struct NoReturnTryViolation;

impl Violation for NoReturnTryViolation {
    fn message(&self) -> String {
        "redundant `try` in a `return` statement".to_string()
    }

    fn help(&self) -> Option<String> {
        Some("`return` already propagates the error union; drop the `try`".to_string())
    }
}

pub struct NoReturnTry;

impl LintRule for NoReturnTry {
    fn rule(&self) -> Rule {
        Rule::NoReturnTry
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::Return { expr: Some(expr) } = ctx.ast().kind(node) else {
            return;
        };
        let NodeKind::Try { .. } = ctx.ast().kind(*expr) else {
            return;
        };
        let span = ctx.span_token(ctx.ast().main_token(*expr));
        ctx.diagnostic(&NoReturnTryViolation, span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_return_try() {
        let diagnostics = lint_one("fn f() !void {\n    return try g();\n}\n", Rule::NoReturnTry);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "no-return-try");
    }

    #[test]
    fn passes_with_plain_return_and_errdefer() {
        let diagnostics = lint_one(
            "fn bar() !void {\n    errdefer std.debug.print(\"x\\n\", .{});\n    return foo();\n}\n",
            Rule::NoReturnTry,
        );
        assert!(diagnostics.is_empty());
    }
}
