use zlint_diagnostics::Violation;
use zlint_semantic::SymbolId;

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A `const`/`var` declaration whose name shadows an enclosing function
/// parameter.
pub struct ShadowedParamViolation {
    pub name: String,
}

impl Violation for ShadowedParamViolation {
    fn message(&self) -> String {
        format!("`{}` shadows a parameter of the enclosing function", self.name)
    }

    fn help(&self) -> Option<String> {
        Some("rename the local binding to avoid shadowing the parameter".to_string())
    }
}

pub struct ShadowedParam;

impl LintRule for ShadowedParam {
    fn rule(&self) -> Rule {
        Rule::ShadowedParam
    }

    fn run_on_symbol(&self, symbol_id: SymbolId, ctx: &LintContext<'_>) {
        let semantic = ctx.semantic();
        let symbol = semantic.symbol(symbol_id);
        if symbol.is_param() || symbol.is_member() || symbol.is_payload() {
            return;
        }
        if !symbol.is_const() && !symbol.flags.contains(zlint_semantic::SymbolFlags::VARIABLE) {
            return;
        }
        let Some(outer_scope) = semantic.scope(symbol.scope).parent else {
            return;
        };
        let Some(shadowed_id) = semantic.lookup(outer_scope, &symbol.name) else {
            return;
        };
        if !semantic.symbol(shadowed_id).is_param() {
            return;
        }
        let span = ctx.span_token(symbol.token);
        ctx.diagnostic(
            &ShadowedParamViolation {
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
    fn flags_a_local_that_shadows_a_parameter() {
        let diagnostics = lint_one(
            "fn f(x: u32) u32 {\n    const x = 1;\n    return x;\n}\n",
            Rule::ShadowedParam,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "shadowed-param");
    }

    #[test]
    fn does_not_flag_an_unrelated_local() {
        let diagnostics = lint_one(
            "fn f(x: u32) u32 {\n    const y = 1;\n    return x + y;\n}\n",
            Rule::ShadowedParam,
        );
        assert!(diagnostics.is_empty());
    }
}
