use zlint_diagnostics::Violation;
use zlint_semantic::SymbolId;

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A function parameter that the body never reads.
pub struct UnusedFunctionParamViolation {
    pub name: String,
}

impl Violation for UnusedFunctionParamViolation {
    fn message(&self) -> String {
        format!("parameter `{}` is never used", self.name)
    }

    fn help(&self) -> Option<String> {
        Some("prefix the name with `_` to mark it as intentionally unused".to_string())
    }
}

pub struct UnusedFunctionParam;

impl LintRule for UnusedFunctionParam {
    fn rule(&self) -> Rule {
        Rule::UnusedFunctionParam
    }

    fn run_on_symbol(&self, symbol_id: SymbolId, ctx: &LintContext<'_>) {
        let symbol = ctx.semantic().symbol(symbol_id);
        if !symbol.is_param() || !symbol.is_unused() {
            return;
        }
        if symbol.name.starts_with('_') {
            return;
        }
        let span = ctx.span_token(symbol.token);
        ctx.diagnostic(
            &UnusedFunctionParamViolation {
                name: symbol.name.to_string(),
            },
            span,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_an_unused_parameter() {
        let diagnostics = lint_one("fn f(x: u32) void {\n    _ = 1;\n}\n", Rule::UnusedFunctionParam);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unused-function-param");
    }

    #[test]
    fn does_not_flag_a_used_parameter() {
        let diagnostics = lint_one("fn f(x: u32) u32 {\n    return x;\n}\n", Rule::UnusedFunctionParam);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn underscore_prefixed_parameters_are_exempt() {
        let diagnostics = lint_one("fn f(_unused: u32) void {\n    _ = 1;\n}\n", Rule::UnusedFunctionParam);
        assert!(diagnostics.is_empty());
    }
}
