//! Applies a file's collected fixes in one pass: filters by the run's fix
//! mode, resolves overlaps, then rewrites the source right-to-left so
//! earlier replacements never invalidate later ones' byte offsets.

use zlint_diagnostics::{Diagnostic, FixApplicability};

/// Which fixes a run is allowed to apply. Mirrors `--fix` (safe fixes and
/// suggestions marked non-dangerous) vs `--fix-dangerously` (everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    Off,
    Safe,
    Dangerous,
}

impl FixMode {
    fn accepts(self, diagnostic: &Diagnostic, rule_fix_kind: zlint_diagnostics::FixKind) -> bool {
        match self {
            FixMode::Off => false,
            FixMode::Safe => {
                matches!(rule_fix_kind.applicability, FixApplicability::Fix | FixApplicability::Suggestion)
                    && !rule_fix_kind.dangerous
                    && diagnostic.fix.is_some()
            }
            FixMode::Dangerous => diagnostic.fix.is_some(),
        }
    }
}

pub struct FixOutcome {
    pub source: String,
    pub fixed_count: usize,
}

/// Applies every applicable, non-conflicting fix to `source` in one pass.
///
/// Candidate fixes are sorted by `(start, end)`. Two fixes conflict when
/// their spans intersect. For a pair of *nested* fixes (one span fully
/// contains the other), the outer fix wins iff its replacement text
/// literally contains the inner fix's original source text — i.e. the
/// outer rewrite already subsumes what the inner one would have done. In
/// every other overlap, the earlier-starting fix wins and the later one is
/// dropped; ties go to the fix with the shorter span.
pub fn apply_fixes(
    source: &str,
    diagnostics: &[Diagnostic],
    rule_fix_kind_of: impl Fn(&Diagnostic) -> zlint_diagnostics::FixKind,
    mode: FixMode,
) -> FixOutcome {
    let mut candidates: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.fix.as_ref().is_some_and(|f| !f.is_noop()))
        .filter(|d| mode.accepts(d, rule_fix_kind_of(d)))
        .collect();
    candidates.sort_by_key(|d| {
        let fix = d.fix.as_ref().expect("filtered to Some above");
        (fix.span.start, fix.span.end)
    });

    let mut accepted: Vec<&Diagnostic> = Vec::new();
    'candidates: for candidate in candidates {
        let candidate_span = candidate.fix.as_ref().unwrap().span;
        for i in 0..accepted.len() {
            let existing = accepted[i];
            let existing_span = existing.fix.as_ref().unwrap().span;
            if !candidate_span.intersects(existing_span) {
                continue;
            }
            let (outer, outer_span, inner, inner_span) = if existing_span.contains(candidate_span) {
                (existing, existing_span, candidate, candidate_span)
            } else if candidate_span.contains(existing_span) {
                (candidate, candidate_span, existing, existing_span)
            } else {
                // Partial overlap, not nested: the earlier/narrower one
                // already accepted wins; drop this candidate.
                continue 'candidates;
            };
            let outer_fix = outer.fix.as_ref().unwrap();
            let inner_text = inner_span.text(source);
            if outer_fix.replacement.contains(inner_text) {
                if std::ptr::eq(outer, candidate) {
                    accepted.remove(i);
                    accepted.push(candidate);
                }
                // else: existing outer fix already subsumes this candidate; drop it.
                continue 'candidates;
            } else {
                // Neither subsumes the other: keep whichever was accepted
                // first (the earlier-starting fix), drop the candidate.
                continue 'candidates;
            }
        }
        accepted.push(candidate);
    }

    accepted.sort_by_key(|d| std::cmp::Reverse(d.fix.as_ref().unwrap().span.start));

    let mut rewritten = source.to_string();
    let mut fixed_count = 0;
    for diagnostic in accepted {
        let fix = diagnostic.fix.as_ref().unwrap();
        let start = fix.span.start as usize;
        let end = fix.span.end as usize;
        rewritten.replace_range(start..end, &fix.replacement);
        fixed_count += 1;
    }

    FixOutcome {
        source: rewritten,
        fixed_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zlint_diagnostics::{Fix, Severity};
    use zlint_span::Span;

    fn diag(code: &'static str, span: Span, fix: Fix) -> Diagnostic {
        Diagnostic::new(code, Severity::Warning, "m", span).with_fix(fix)
    }

    fn always_fix(_d: &Diagnostic) -> zlint_diagnostics::FixKind {
        zlint_diagnostics::FixKind::fix()
    }

    #[test]
    fn applies_a_single_fix() {
        let source = "const std = @import(\"std\");\n";
        let d = diag(
            "unused-import",
            Span::new(0, source.len() as u32 - 1),
            Fix::deletion(Span::new(0, source.len() as u32 - 1)),
        );
        let outcome = apply_fixes(source, &[d], always_fix, FixMode::Safe);
        assert_eq!(outcome.fixed_count, 1);
        assert_eq!(outcome.source, "\n");
    }

    #[test]
    fn outer_fix_wins_when_it_contains_the_inner_fixs_text() {
        let source = "comptime {\n    comptime {\n        x();\n    }\n}\n";
        let inner_span = Span::new(15, 38);
        let outer_span = Span::new(0, 46);
        let inner_text = inner_span.text(source).to_string();
        let outer = diag("redundant-comptime-block", outer_span, Fix::new(outer_span, inner_text.clone()));
        let inner = diag("redundant-comptime-block", inner_span, Fix::new(inner_span, inner_text));
        let outcome = apply_fixes(source, &[inner, outer], always_fix, FixMode::Safe);
        assert_eq!(outcome.fixed_count, 1);
    }

    #[test]
    fn applying_fixes_twice_is_idempotent() {
        let source = "const std = @import(\"std\");\n";
        let span = Span::new(0, source.len() as u32 - 1);
        let d = diag("unused-import", span, Fix::deletion(span));
        let once = apply_fixes(source, &[d], always_fix, FixMode::Safe);
        let twice = apply_fixes(&once.source, &[], always_fix, FixMode::Safe);
        assert_eq!(once.source, twice.source);
    }

    #[test]
    fn fix_off_mode_applies_nothing() {
        let source = "const std = @import(\"std\");\n";
        let span = Span::new(0, source.len() as u32 - 1);
        let d = diag("unused-import", span, Fix::deletion(span));
        let outcome = apply_fixes(source, &[d], always_fix, FixMode::Off);
        assert_eq!(outcome.fixed_count, 0);
        assert_eq!(outcome.source, source);
    }
}
