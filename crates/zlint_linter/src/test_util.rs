//! Shared harness for rule unit tests: parse, build the semantic model,
//! isolate a single rule via `LinterSettings::for_rule`, and run the
//! dispatcher exactly as the engine would for one file.

use zlint_diagnostics::Diagnostic;
use zlint_directives::DirectiveSet;
use zlint_source::Source;

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::RuleDispatcher;
use crate::settings::LinterSettings;

pub fn lint_one(source: &str, rule: Rule) -> Vec<Diagnostic> {
    let parsed = zlint_syntax::parse(source);
    assert!(!parsed.has_errors(), "unexpected parse errors: {:?}", parsed.errors);
    let semantic = zlint_semantic::build(&parsed.ast, source).expect("semantic analysis should succeed");
    let settings = LinterSettings::for_rule(rule);
    let src = Source::new("test.zig", source);
    let ctx = LintContext::new(&parsed.ast, &semantic, &src, &settings);
    let dispatcher = RuleDispatcher::new(crate::rules::catalog());
    let directives = DirectiveSet::default();
    dispatcher.run(&ctx, &src, &directives)
}

/// Like [`lint_one`] but for several rules at once, with disable directives
/// parsed from the source's own comments rather than an empty set — the
/// harness the engine itself uses, minus the filesystem and fixer steps.
pub fn lint_with_directives(source: &str, rules: &[Rule]) -> Vec<Diagnostic> {
    let (parsed, comments) = zlint_syntax::parse_with_comments(source);
    assert!(!parsed.has_errors(), "unexpected parse errors: {:?}", parsed.errors);
    let semantic = zlint_semantic::build(&parsed.ast, source).expect("semantic analysis should succeed");
    let settings = LinterSettings::for_rules(rules);
    let src = Source::new("test.zig", source);
    let ctx = LintContext::new(&parsed.ast, &semantic, &src, &settings);
    let dispatcher = RuleDispatcher::new(crate::rules::catalog());
    let directives = DirectiveSet::from_source(&src, &comments);
    dispatcher.run(&ctx, &src, &directives)
}
