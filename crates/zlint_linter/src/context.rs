//! [`LintContext`]: the per-file facade every rule receives. Bundles AST
//! and semantic-model access with diagnostic emission so a rule never has
//! to reach into `zlint_syntax`/`zlint_semantic` internals directly.

use std::cell::{Cell, RefCell};

use zlint_diagnostics::{Diagnostic, Fix, Violation};
use zlint_semantic::SemanticModel;
use zlint_source::Source;
use zlint_span::Span;
use zlint_syntax::{Ast, NodeId, NodeKind, TokenId, Tokens};

use zlint_codes::Rule;

use crate::settings::LinterSettings;

/// Borrows the AST, semantic model, and source for one file's rule
/// execution. Never shared across threads and never outlives the call
/// that dispatches rules over a single file — a rule must not stash a
/// `&LintContext` anywhere that survives past its own visitor call.
pub struct LintContext<'a> {
    ast: &'a Ast,
    semantic: &'a SemanticModel,
    source: &'a Source,
    settings: &'a LinterSettings,
    current_rule: Cell<Option<Rule>>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<'a> LintContext<'a> {
    pub fn new(ast: &'a Ast, semantic: &'a SemanticModel, source: &'a Source, settings: &'a LinterSettings) -> Self {
        Self {
            ast,
            semantic,
            source,
            settings,
            current_rule: Cell::new(None),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    #[inline]
    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    #[inline]
    pub fn semantic(&self) -> &'a SemanticModel {
        self.semantic
    }

    #[inline]
    pub fn tokens(&self) -> &'a Tokens {
        self.ast.tokens()
    }

    pub fn token_slice(&self, token: TokenId) -> &'a str {
        self.tokens().slice(token, self.source.text())
    }

    pub fn span_token(&self, token: TokenId) -> Span {
        self.tokens().span(token)
    }

    pub fn span_node(&self, node: NodeId) -> Span {
        self.ast.span(node)
    }

    pub fn settings(&self) -> &'a LinterSettings {
        self.settings
    }

    #[inline]
    pub fn source(&self) -> &'a Source {
        self.source
    }

    /// The rule whose visitor is currently executing. The dispatcher sets
    /// this immediately before each `run_on_node`/`run_on_symbol` call;
    /// every diagnostic-emitting method reads it to stamp `code` and
    /// `severity`.
    pub fn rule(&self) -> Rule {
        self.current_rule.get().expect("rule() called outside a rule's visitor")
    }

    pub(crate) fn set_current_rule(&self, rule: Rule) {
        self.current_rule.set(Some(rule));
    }

    pub fn diagnostic(&self, violation: &impl Violation, primary: Span) {
        let rule = self.rule();
        let severity = self.settings.severity_of(rule);
        if severity.is_off() {
            return;
        }
        let diagnostic = Diagnostic::from_violation(rule.name(), severity, violation, primary);
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn diagnostic_fix(&self, violation: &impl Violation, primary: Span, fix: Fix) {
        let rule = self.rule();
        let severity = self.settings.severity_of(rule);
        if severity.is_off() {
            return;
        }
        let diagnostic = Diagnostic::from_violation(rule.name(), severity, violation, primary).with_fix(fix);
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Drains every diagnostic collected so far. Called once per file by
    /// the dispatcher after every rule has run.
    pub(crate) fn take_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// True if `node` has a `test { ... }` block among its ancestors.
    pub fn is_in_test(&self, node: NodeId) -> bool {
        self.semantic.ancestors_of(node).any(|ancestor| {
            matches!(self.ast.kind(ancestor), NodeKind::TestDecl { .. })
        })
    }

    /// For a `FieldAccess` chain like `a.b.c`, returns the token of the
    /// rightmost identifier (`c`). Returns the node's own identifier token
    /// if `node` isn't a field access at all.
    pub fn rightmost_identifier(&self, node: NodeId) -> Option<TokenId> {
        match self.ast.kind(node) {
            NodeKind::FieldAccess { field_token, .. } => Some(*field_token),
            NodeKind::Identifier { token } => Some(*token),
            _ => None,
        }
    }

    /// Whether a type-position node denotes an error union (`E!T` or
    /// `!T`), the query `no-return-try`/`homeless-try` both need to decide
    /// whether a function's return type can carry an error at all.
    pub fn has_error_union(&self, type_node: NodeId) -> bool {
        matches!(self.ast.kind(type_node), NodeKind::ErrorUnion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zlint_codes::Rule;
    use zlint_diagnostics::Severity;
    use zlint_syntax::parse;

    struct DummyViolation;
    impl Violation for DummyViolation {
        fn message(&self) -> String {
            "dummy".to_string()
        }
    }

    #[test]
    fn diagnostic_is_dropped_when_rule_is_off() {
        let source = Source::new("a.zig", "const x = undefined;\n");
        let parsed = parse(source.text());
        let semantic = zlint_semantic::build(&parsed.ast, source.text()).unwrap();
        let mut settings = LinterSettings::new();
        settings.set_severity(Rule::UnsafeUndefined, Severity::Off);
        let ctx = LintContext::new(&parsed.ast, &semantic, &source, &settings);
        ctx.set_current_rule(Rule::UnsafeUndefined);
        ctx.diagnostic(&DummyViolation, Span::new(0, 1));
        assert!(ctx.take_diagnostics().is_empty());
    }

    #[test]
    fn diagnostic_stamps_rule_code_and_severity() {
        let source = Source::new("a.zig", "const x = undefined;\n");
        let parsed = parse(source.text());
        let semantic = zlint_semantic::build(&parsed.ast, source.text()).unwrap();
        let settings = LinterSettings::new();
        let ctx = LintContext::new(&parsed.ast, &semantic, &source, &settings);
        ctx.set_current_rule(Rule::UnsafeUndefined);
        ctx.diagnostic(&DummyViolation, Span::new(10, 19));
        let diagnostics = ctx.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unsafe-undefined");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }
}
