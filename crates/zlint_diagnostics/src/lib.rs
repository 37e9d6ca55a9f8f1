//! Diagnostic records, source fixes, and the `Violation` trait rules
//! implement to describe what they found.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use zlint_span::{LabeledSpan, Span};

/// Severity of a diagnostic. `Off` must never reach a formatter: the
/// dispatcher skips rules configured `off` before any diagnostic is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Off,
    Notice,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub const fn is_off(self) -> bool {
        matches!(self, Severity::Off)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "allow" => Ok(Severity::Off),
            "notice" => Ok(Severity::Notice),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            other => Err(format!("unknown severity `{other}`")),
        }
    }
}

/// Whether a rule's fix is safe to apply automatically, a suggestion that
/// requires `--fix-dangerously`-style opt-in, or nonexistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixApplicability {
    None,
    Fix,
    Suggestion,
}

/// Per-rule fix metadata: the applicability tier, plus whether the fix is
/// additionally flagged `dangerous` (only applied by `--fix-dangerously`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixKind {
    pub applicability: FixApplicability,
    pub dangerous: bool,
}

impl FixKind {
    pub const NONE: FixKind = FixKind {
        applicability: FixApplicability::None,
        dangerous: false,
    };

    pub const fn fix() -> Self {
        Self {
            applicability: FixApplicability::Fix,
            dangerous: false,
        }
    }

    pub const fn suggestion() -> Self {
        Self {
            applicability: FixApplicability::Suggestion,
            dangerous: false,
        }
    }

    #[must_use]
    pub const fn dangerous(mut self) -> Self {
        self.dangerous = true;
        self
    }

    pub const fn is_applicable(self) -> bool {
        !matches!(self.applicability, FixApplicability::None)
    }
}

/// A span + replacement-text pair that transforms source when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub span: Span,
    pub replacement: String,
}

impl Fix {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    pub fn deletion(span: Span) -> Self {
        Self::new(span, String::new())
    }

    pub fn insertion(offset: u32, text: impl Into<String>) -> Self {
        Self::new(Span::empty(offset), text)
    }

    /// A fix is a no-op if it replaces an empty span with empty text.
    pub fn is_noop(&self) -> bool {
        self.span.is_empty() && self.replacement.is_empty()
    }
}

/// Implemented by every lint rule's finding type. Mirrors the teacher's
/// `Violation` trait (`ruff_diagnostics::Violation`): a small, ideally
/// zero-sized struct describing one category of finding, with enough data
/// captured as fields to render a precise message.
pub trait Violation {
    /// The rendered diagnostic body, e.g. ``"`__version__` may contain
    /// non-integral-like elements"``.
    fn message(&self) -> String;

    /// Optional `help:` footer text shown beneath the rendered source
    /// context.
    fn help(&self) -> Option<String> {
        None
    }
}

/// A single rule violation record: severity, code, message, optional help
/// text, labeled spans (first primary span is the one formatters underline
/// by default), and an optional fix.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub help: Option<String>,
    pub source_name: Option<PathBuf>,
    pub labels: Vec<LabeledSpan>,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(code: &'static str, severity: Severity, message: impl Into<String>, primary: Span) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            help: None,
            source_name: None,
            labels: vec![LabeledSpan::new(primary)],
            fix: None,
        }
    }

    pub fn from_violation(
        code: &'static str,
        severity: Severity,
        violation: &impl Violation,
        primary: Span,
    ) -> Self {
        let mut diagnostic = Self::new(code, severity, violation.message(), primary);
        diagnostic.help = violation.help();
        diagnostic
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: LabeledSpan) -> Self {
        self.labels.push(label);
        self
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// The diagnostic's primary span, i.e. the one formatters underline and
    /// use for `line:col` in the masthead. Every `Diagnostic` is constructed
    /// with at least one (its primary) label.
    pub fn primary_span(&self) -> Span {
        self.labels
            .iter()
            .find(|label| label.primary)
            .or_else(|| self.labels.first())
            .map(|label| label.span)
            .unwrap_or(Span::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_noop_requires_both_empty() {
        assert!(Fix::new(Span::empty(0), "").is_noop());
        assert!(!Fix::new(Span::empty(0), "x").is_noop());
        assert!(!Fix::new(Span::new(0, 1), "").is_noop());
    }

    #[test]
    fn severity_from_str_synonyms() {
        assert_eq!("off".parse::<Severity>().unwrap(), Severity::Off);
        assert_eq!("allow".parse::<Severity>().unwrap(), Severity::Off);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
        assert!("bogus".parse::<Severity>().is_err());
    }

    #[test]
    fn primary_span_prefers_flagged_primary_label() {
        let diag = Diagnostic::new("x", Severity::Error, "m", Span::new(0, 1))
            .with_label(LabeledSpan::new(Span::new(5, 6)).secondary());
        assert_eq!(diag.primary_span(), Span::new(0, 1));
    }
}
