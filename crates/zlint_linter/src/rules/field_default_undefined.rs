use zlint_diagnostics::Violation;
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// A container field whose default value is `undefined`.
pub struct FieldDefaultUndefinedViolation;

impl Violation for FieldDefaultUndefinedViolation {
    fn message(&self) -> String {
        "field defaults to `undefined`, leaving it unsafe to read before assignment".to_string()
    }

    fn help(&self) -> Option<String> {
        Some("give the field a concrete default, or require callers to set it explicitly".to_string())
    }
}

pub struct FieldDefaultUndefined;

impl LintRule for FieldDefaultUndefined {
    fn rule(&self) -> Rule {
        Rule::FieldDefaultUndefined
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::ContainerField { default: Some(default), .. } = ctx.ast().kind(node) else {
            return;
        };
        if !matches!(ctx.ast().kind(*default), NodeKind::UndefinedLiteral { .. }) {
            return;
        }
        ctx.diagnostic(&FieldDefaultUndefinedViolation, ctx.span_node(*default));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_a_field_defaulting_to_undefined() {
        let diagnostics = lint_one(
            "const Foo = struct { x: u32 = undefined };\n",
            Rule::FieldDefaultUndefined,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "field-default-undefined");
    }

    #[test]
    fn does_not_flag_a_field_with_a_concrete_default() {
        let diagnostics = lint_one(
            "const Foo = struct { x: u32 = 0 };\n",
            Rule::FieldDefaultUndefined,
        );
        assert!(diagnostics.is_empty());
    }
}
