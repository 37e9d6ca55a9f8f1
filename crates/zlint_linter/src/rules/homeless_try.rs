use zlint_diagnostics::Violation;
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// `try` used outside of any function body, where there is no enclosing
/// error-propagating call frame to return the error to.
pub struct HomelessTryViolation;

impl Violation for HomelessTryViolation {
    fn message(&self) -> String {
        "`try` has no enclosing function to propagate its error to".to_string()
    }

    fn help(&self) -> Option<String> {
        Some("move this expression inside a function, or handle the error explicitly with `catch`".to_string())
    }
}

pub struct HomelessTry;

impl LintRule for HomelessTry {
    fn rule(&self) -> Rule {
        Rule::HomelessTry
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::Try { .. } = ctx.ast().kind(node) else {
            return;
        };
        let has_enclosing_fn = ctx
            .semantic()
            .ancestors_of(node)
            .any(|ancestor| matches!(ctx.ast().kind(ancestor), NodeKind::FnDecl { .. }));
        if has_enclosing_fn {
            return;
        }
        let span = ctx.span_token(ctx.ast().main_token(node));
        ctx.diagnostic(&HomelessTryViolation, span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_try_outside_any_function() {
        let diagnostics = lint_one(
            "const x = try std.heap.page_allocator.alloc(u8, 8);\n",
            Rule::HomelessTry,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "homeless-try");
    }

    #[test]
    fn try_inside_a_function_is_fine() {
        let diagnostics = lint_one(
            "fn f() !void {\n    const x = try g();\n    _ = x;\n}\n",
            Rule::HomelessTry,
        );
        assert!(diagnostics.is_empty());
    }
}
