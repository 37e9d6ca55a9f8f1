//! Recognizes `// zlint-disable` / `// zlint-disable-next-line` comments and
//! answers "is rule R suppressed at position P?" for the dispatcher.
//!
//! Runs once per file over the line-comment spans `zlint_syntax::parse_with_comments`
//! already collected — this crate never re-tokenizes source, it only slices
//! comment text out of the `Source` it's handed.

use itertools::Itertools;

use zlint_source::Source;
use zlint_span::Span;

/// Whether a directive suppresses rules for the rest of the file or only on
/// the single line that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Global,
    Line,
}

/// One recognized `zlint-disable[-next-line]` comment.
#[derive(Debug, Clone)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub span: Span,
    /// Rule names named on the directive. Empty means "disable everything".
    pub disabled_rules: Vec<Box<str>>,
}

impl Directive {
    pub fn disables_all(&self) -> bool {
        self.disabled_rules.is_empty()
    }

    pub fn disables(&self, rule_name: &str) -> bool {
        self.disables_all() || self.disabled_rules.iter().any(|r| r.as_ref() == rule_name)
    }
}

const GLOBAL_MARKER: &str = "zlint-disable";
const LINE_MARKER: &str = "zlint-disable-next-line";

/// Strips a leading `//`, `///`, or `//!` and surrounding whitespace.
fn comment_body(text: &str) -> &str {
    let trimmed = text.trim_start_matches('/');
    let trimmed = trimmed.strip_prefix('!').unwrap_or(trimmed);
    trimmed.trim()
}

fn parse_one(span: Span, text: &str) -> Option<Directive> {
    let body = comment_body(text);
    let (kind, rest) = if let Some(rest) = body.strip_prefix(LINE_MARKER) {
        (DirectiveKind::Line, rest)
    } else if let Some(rest) = body.strip_prefix(GLOBAL_MARKER) {
        (DirectiveKind::Global, rest)
    } else {
        return None;
    };

    // Anything after the marker but before a word boundary disqualifies the
    // match (e.g. `zlint-disable-foo` is not a directive).
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim_start();
    let rule_part = rest.split("--").next().unwrap_or("").trim();
    let disabled_rules = rule_part
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_matches(',').into())
        .collect_vec();

    Some(Directive {
        kind,
        span,
        disabled_rules,
    })
}

/// Parses every line-comment span into zero-or-one [`Directive`]s.
pub fn parse(source: &Source, comments: &[Span]) -> Vec<Directive> {
    comments
        .iter()
        .filter_map(|&span| parse_one(span, source.snippet(span)))
        .collect()
}

/// The parsed set of directives for one file, plus the query the dispatcher
/// actually needs: "is `rule_name` disabled at this byte offset?".
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet {
    directives: Vec<Directive>,
}

impl DirectiveSet {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self { directives }
    }

    pub fn from_source(source: &Source, comments: &[Span]) -> Self {
        Self::new(parse(source, comments))
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// True if any directive suppresses `rule_name` at `offset`.
    ///
    /// A `global` directive applies everywhere in the file, regardless of
    /// whether it appears before or after `offset` (matching the spec's
    /// "misplaced directives still apply to subsequent lines" note — a
    /// trailing global directive simply has no code left to suppress).
    /// A `line` directive applies only to the single source line
    /// immediately following the comment.
    pub fn is_disabled(&self, source: &Source, rule_name: &str, offset: u32) -> bool {
        let target_line = source.line_index(offset);
        self.directives.iter().any(|d| {
            if !d.disables(rule_name) {
                return false;
            }
            match d.kind {
                DirectiveKind::Global => true,
                DirectiveKind::Line => {
                    let directive_line = source.line_index(d.span.start);
                    target_line.get() == directive_line.get() + 1
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_directive_disables_named_rules() {
        let source = Source::new("a.zig", "// zlint-disable unsafe-undefined\nconst x = undefined;\n");
        let comment_span = Span::new(0, 35);
        let directives = parse(&source, &[comment_span]);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].kind, DirectiveKind::Global);
        assert!(directives[0].disables("unsafe-undefined"));
        assert!(!directives[0].disables("unused-decls"));
    }

    #[test]
    fn empty_rule_list_disables_everything() {
        let source = Source::new("a.zig", "// zlint-disable\nconst x = undefined;\n");
        let comment_span = Span::new(0, 16);
        let directives = parse(&source, &[comment_span]);
        assert!(directives[0].disables_all());
        assert!(directives[0].disables("anything"));
    }

    #[test]
    fn line_directive_only_applies_to_the_next_line() {
        let source = Source::new(
            "a.zig",
            "// zlint-disable-next-line unsafe-undefined\nconst x = undefined;\nconst y = undefined;\n",
        );
        let comment_span = Span::new(0, 44);
        let set = DirectiveSet::from_source(&source, &[comment_span]);
        let line2_offset = source.line_start(zlint_span::OneIndexed::from_zero_indexed(1));
        let line3_offset = source.line_start(zlint_span::OneIndexed::from_zero_indexed(2));
        assert!(set.is_disabled(&source, "unsafe-undefined", line2_offset));
        assert!(!set.is_disabled(&source, "unsafe-undefined", line3_offset));
    }

    #[test]
    fn comma_separated_rule_list() {
        let source = Source::new("a.zig", "// zlint-disable unsafe-undefined, unused-decls\n");
        let comment_span = Span::new(0, 48);
        let directives = parse(&source, &[comment_span]);
        assert_eq!(directives[0].disabled_rules.len(), 2);
        assert!(directives[0].disables("unused-decls"));
    }

    #[test]
    fn trailing_comment_text_after_double_dash_is_ignored() {
        let source = Source::new("a.zig", "// zlint-disable unused-decls -- legacy code\n");
        let comment_span = Span::new(0, 45);
        let directives = parse(&source, &[comment_span]);
        assert_eq!(directives[0].disabled_rules.len(), 1);
        assert!(directives[0].disables("unused-decls"));
    }

    #[test]
    fn module_doc_comment_directive_is_recognized() {
        let source = Source::new("a.zig", "//! zlint-disable unsafe-undefined\nconst x = undefined;\n");
        let comment_span = Span::new(0, 35);
        let directives = parse(&source, &[comment_span]);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].kind, DirectiveKind::Global);
        assert!(directives[0].disables("unsafe-undefined"));
    }

    #[test]
    fn unrelated_comment_is_not_a_directive() {
        let source = Source::new("a.zig", "// just a comment\n");
        let comment_span = Span::new(0, 18);
        assert!(parse(&source, &[comment_span]).is_empty());
    }
}
