use zlint_diagnostics::Violation;
use zlint_semantic::{SymbolFlags, SymbolId};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A `const`/`var` declaration that is never referenced anywhere in the
/// file.
pub struct UnusedDeclsViolation {
    pub name: String,
}

impl Violation for UnusedDeclsViolation {
    fn message(&self) -> String {
        format!("`{}` is declared but never used", self.name)
    }

    fn help(&self) -> Option<String> {
        Some("remove the declaration, or prefix the name with `_` if it's intentionally unused".to_string())
    }
}

pub struct UnusedDecls;

impl LintRule for UnusedDecls {
    fn rule(&self) -> Rule {
        Rule::UnusedDecls
    }

    fn run_on_symbol(&self, symbol_id: SymbolId, ctx: &LintContext<'_>) {
        let symbol = ctx.semantic().symbol(symbol_id);
        let is_var_or_const = symbol.flags.intersects(SymbolFlags::CONST | SymbolFlags::VARIABLE);
        if !is_var_or_const || symbol.is_member() || symbol.is_param() || symbol.is_payload() {
            return;
        }
        if symbol.flags.contains(SymbolFlags::EXPORT) || !symbol.is_unused() {
            return;
        }
        if symbol.name.starts_with('_') {
            return;
        }
        let span = ctx.span_token(symbol.token);
        ctx.diagnostic(
            &UnusedDeclsViolation {
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
    fn flags_an_unused_top_level_const() {
        let diagnostics = lint_one(
            "const Unused = struct { x: u32 = undefined };\n",
            Rule::UnusedDecls,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unused-decls");
    }

    #[test]
    fn does_not_flag_a_used_const() {
        let diagnostics = lint_one("const x = 1;\nconst y = x;\n", Rule::UnusedDecls);
        assert!(diagnostics.iter().all(|d| !d.message.contains("`x`")));
    }

    #[test]
    fn underscore_prefixed_names_are_exempt() {
        let diagnostics = lint_one("const _unused = 1;\n", Rule::UnusedDecls);
        assert!(diagnostics.is_empty());
    }
}
