use zlint_diagnostics::{Fix, Violation};
use zlint_semantic::SymbolId;
use zlint_syntax::NodeKind;

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A `const foo = @import("...")` binding that nothing in the file
/// references.
pub struct UnusedImportViolation {
    pub name: String,
}

impl Violation for UnusedImportViolation {
    fn message(&self) -> String {
        format!("imported module `{}` is never used", self.name)
    }

    fn help(&self) -> Option<String> {
        Some("remove the unused import".to_string())
    }
}

pub struct UnusedImport;

impl LintRule for UnusedImport {
    fn rule(&self) -> Rule {
        Rule::UnusedImport
    }

    fn run_on_symbol(&self, symbol_id: SymbolId, ctx: &LintContext<'_>) {
        let symbol = ctx.semantic().symbol(symbol_id);
        if !symbol.is_const() || !symbol.is_unused() {
            return;
        }
        let NodeKind::VarDecl { init: Some(init), .. } = ctx.ast().kind(symbol.decl_node) else {
            return;
        };
        let NodeKind::BuiltinCall { name_token, .. } = ctx.ast().kind(*init) else {
            return;
        };
        if ctx.token_slice(*name_token) != "@import" {
            return;
        }
        let decl_span = ctx.span_node(symbol.decl_node);
        let fix = Fix::deletion(decl_span);
        ctx.diagnostic_fix(
            &UnusedImportViolation {
                name: symbol.name.to_string(),
            },
            decl_span,
            fix,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_an_unused_import() {
        let diagnostics = lint_one("const std = @import(\"std\");\n", Rule::UnusedImport);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unused-import");
        assert!(diagnostics[0].fix.is_some());
    }

    #[test]
    fn does_not_flag_a_used_import() {
        let diagnostics = lint_one(
            "const std = @import(\"std\");\nconst x = std.math.pi;\n",
            Rule::UnusedImport,
        );
        assert!(diagnostics.is_empty());
    }
}
