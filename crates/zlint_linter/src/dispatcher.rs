//! Runs every enabled rule's visitors over one file's AST and symbol table,
//! then filters the collected diagnostics against that file's disable
//! directives.
//!
//! Mirrors the teacher's `Checker`: a single pass over the tree (here,
//! `Ast::preorder`) drives every rule's `run_on_node`, followed by one pass
//! over the symbol table for `run_on_symbol`. Unlike `Checker`, there's no
//! combined binding/traversal step — `zlint_semantic` already built the
//! whole symbol table up front, so dispatch is pure analysis.

use std::panic::{self, AssertUnwindSafe};

use zlint_diagnostics::Diagnostic;
use zlint_directives::DirectiveSet;
use zlint_source::Source;
use zlint_syntax::NodeId;

use zlint_codes::Rule;
use zlint_semantic::SymbolId;

use crate::context::LintContext;

/// A rule's capability set: metadata plus zero or more visitors. A rule
/// that only cares about symbols (e.g. `unused-decls`) simply doesn't
/// override `run_on_node`, and vice versa.
pub trait LintRule: Send + Sync {
    fn rule(&self) -> Rule;

    fn run_on_node(&self, _node: NodeId, _ctx: &LintContext<'_>) {}

    fn run_on_symbol(&self, _symbol: SymbolId, _ctx: &LintContext<'_>) {}
}

pub struct RuleDispatcher {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleDispatcher {
    pub fn new(rules: Vec<Box<dyn LintRule>>) -> Self {
        Self { rules }
    }

    /// Runs every rule not configured `off` over `ctx`, then drops any
    /// diagnostic suppressed by a disable directive covering its rule at
    /// its primary span. A rule that panics is caught and logged; every
    /// other rule still runs to completion (`4.4`'s failure-isolation
    /// contract).
    pub fn run(&self, ctx: &LintContext<'_>, source: &Source, directives: &DirectiveSet) -> Vec<Diagnostic> {
        let active: Vec<&Box<dyn LintRule>> = self
            .rules
            .iter()
            .filter(|r| !ctx.settings().severity_of(r.rule()).is_off())
            .collect();

        for node in ctx.ast().preorder() {
            for rule in &active {
                ctx.set_current_rule(rule.rule());
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.run_on_node(node, ctx)));
                if outcome.is_err() {
                    log::error!("rule `{}` panicked while visiting a node; skipping", rule.rule().name());
                }
            }
        }

        for (symbol_id, _) in ctx.semantic().symbols() {
            for rule in &active {
                ctx.set_current_rule(rule.rule());
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.run_on_symbol(symbol_id, ctx)));
                if outcome.is_err() {
                    log::error!("rule `{}` panicked while visiting a symbol; skipping", rule.rule().name());
                }
            }
        }

        ctx.take_diagnostics()
            .into_iter()
            .filter(|diagnostic| !directives.is_disabled(source, diagnostic.code, diagnostic.primary_span().start))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::lint_with_directives;
    use zlint_codes::Rule;

    /// A disable directive suppressing one rule must not suppress a second,
    /// still-enabled rule's finding elsewhere in the same file.
    #[test]
    fn disable_directive_suppresses_only_its_own_rule() {
        let source = "fn f() void {\n    // zlint-disable-next-line unsafe-undefined\n    var x: u32 = undefined;\n    _ = x;\n    const y = 1;\n}\n";
        let diagnostics = lint_with_directives(source, &[Rule::UnsafeUndefined, Rule::UnusedDecls]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unused-decls");
    }
}
