use zlint_diagnostics::Violation;
use zlint_syntax::{NodeId, NodeKind};

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::LintRule;

/// `undefined` used to initialize a variable or constant. Reading it before
/// a real value is assigned is undefined behavior in Zig, not a
/// compile-time-checked error.
pub struct UnsafeUndefinedViolation;

impl Violation for UnsafeUndefinedViolation {
    fn message(&self) -> String {
        "initializing a binding with `undefined` leaves it unsafe to read before assignment".to_string()
    }

    fn help(&self) -> Option<String> {
        Some("assign a concrete value, or document why the binding is write-only until later".to_string())
    }
}

pub struct UnsafeUndefined;

impl LintRule for UnsafeUndefined {
    fn rule(&self) -> Rule {
        Rule::UnsafeUndefined
    }

    fn run_on_node(&self, node: NodeId, ctx: &LintContext<'_>) {
        let NodeKind::UndefinedLiteral { .. } = ctx.ast().kind(node) else {
            return;
        };
        // A container field's default value is `field-default-undefined`'s
        // territory, not this rule's.
        if let Some(parent) = ctx.semantic().parent_of(node) {
            if matches!(ctx.ast().kind(parent), NodeKind::ContainerField { .. }) {
                return;
            }
        }
        let span = ctx.span_node(node);
        ctx.diagnostic(&UnsafeUndefinedViolation, span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lint_one;

    #[test]
    fn flags_undefined_var_initializer() {
        let diagnostics = lint_one("const x = undefined;\n", Rule::UnsafeUndefined);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unsafe-undefined");
    }

    #[test]
    fn does_not_flag_a_container_fields_default() {
        let diagnostics = lint_one(
            "const Foo = struct { x: u32 = undefined };\n",
            Rule::UnsafeUndefined,
        );
        assert!(diagnostics.is_empty());
    }
}
