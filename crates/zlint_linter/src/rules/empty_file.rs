use zlint_diagnostics::Violation;
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A file with no top-level declarations at all.
pub struct EmptyFileViolation;

impl Violation for EmptyFileViolation {
    fn message(&self) -> String {
        "file has no declarations".to_string()
    }
}

pub struct EmptyFile;

impl LintRule for EmptyFile {
    fn rule(&self) -> Rule {
        Rule::EmptyFile
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::Root { decls } = ctx.ast().kind(node) else {
            return;
        };
        if !decls.is_empty() {
            return;
        }
        ctx.diagnostic(&EmptyFileViolation, ctx.span_node(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_a_file_with_no_declarations() {
        let diagnostics = lint_one("", Rule::EmptyFile);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "empty-file");
    }

    #[test]
    fn does_not_flag_a_nonempty_file() {
        let diagnostics = lint_one("const x = 1;\n", Rule::EmptyFile);
        assert!(diagnostics.is_empty());
    }
}
