//! The three diagnostic renderers: graphical (default, for terminals),
//! GitHub Actions annotations, and NDJSON. All three share the same
//! `(writer, Diagnostic) -> ()` contract so the `Reporter` can hold one as
//! a trait object and not care which was selected.

use std::io::Write;

use colored::{Color, Colorize};
use serde::Serialize;

use zlint_diagnostics::{Diagnostic, Severity};
use zlint_source::Source;

/// A renderer for one diagnostic at a time. Implementations must not
/// retain the diagnostic past the call — they borrow it, write it, and
/// return.
pub trait Formatter: Send + Sync {
    fn format(&self, writer: &mut dyn Write, source: &Source, diagnostic: &Diagnostic) -> std::io::Result<()>;
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Notice => Color::Cyan,
        Severity::Off => Color::White,
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Notice => "notice",
        Severity::Off => "off",
    }
}

/// Default terminal output: a colored header, a `path:line:col` masthead,
/// up to 3 lines of source context with a line-number gutter, an
/// underline of the primary span, and a `help:` footer.
pub struct GraphicalFormatter {
    pub color: bool,
}

impl GraphicalFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

const MAX_CONTEXT_LINES: usize = 3;

impl Formatter for GraphicalFormatter {
    fn format(&self, writer: &mut dyn Write, source: &Source, diagnostic: &Diagnostic) -> std::io::Result<()> {
        let span = diagnostic.primary_span();
        let start = source.line_column(span.start);
        let end_offset = span.end.max(span.start);
        let end = source.line_column(end_offset.min(source.len() as u32));

        let header = format!("{}[{}]", severity_icon(diagnostic.severity), diagnostic.code);
        writeln!(
            writer,
            "{}: {}",
            self.paint(&header, severity_color(diagnostic.severity)),
            diagnostic.message
        )?;
        writeln!(
            writer,
            "  --> {}:{}:{}",
            source.name().display(),
            start.line.get(),
            start.column.get()
        )?;

        let first_line = start.line.get();
        let last_line = end.line.get().min(first_line + MAX_CONTEXT_LINES as u32 - 1);
        let gutter_width = last_line.to_string().len();
        for line in first_line..=last_line {
            let one_indexed = zlint_span::OneIndexed::from_zero_indexed(line - 1);
            let text = source.line_text(one_indexed);
            writeln!(writer, "{:>width$} | {}", line, text.trim_end_matches(['\n', '\r']), width = gutter_width)?;
            if line == first_line {
                let underline_start = start.column.get().saturating_sub(1) as usize;
                let underline_len = if span.is_empty() {
                    1
                } else if line == end.line.get() {
                    (end.column.get() as usize).saturating_sub(start.column.get() as usize).max(1)
                } else {
                    text.trim_end_matches(['\n', '\r']).len().saturating_sub(underline_start).max(1)
                };
                let marker = "^".repeat(underline_len);
                writeln!(
                    writer,
                    "{:width$} | {}{}",
                    "",
                    " ".repeat(underline_start),
                    self.paint(&marker, severity_color(diagnostic.severity)),
                    width = gutter_width
                )?;
            }
        }

        if let Some(help) = &diagnostic.help {
            writeln!(writer, "  help: {help}")?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/// `::{level} file=PATH,line=L,col=C,title=CODE::MESSAGE`, one line per
/// diagnostic, for GitHub Actions' workflow-command annotation format.
pub struct GithubFormatter;

impl Formatter for GithubFormatter {
    fn format(&self, writer: &mut dyn Write, source: &Source, diagnostic: &Diagnostic) -> std::io::Result<()> {
        let level = match diagnostic.severity {
            Severity::Error => "error",
            Severity::Warning | Severity::Notice => "warning",
            Severity::Off => return Ok(()),
        };
        let span = diagnostic.primary_span();
        let (line, col) = if span == zlint_span::Span::EMPTY && source.is_empty() {
            (1, 1)
        } else {
            let pos = source.line_column(span.start);
            (pos.line.get(), pos.column.get())
        };
        writeln!(
            writer,
            "::{level} file={},line={},col={},title={}::{}",
            source.name().display(),
            line,
            col,
            diagnostic.code,
            diagnostic.message
        )
    }
}

#[derive(Serialize)]
struct JsonPosition {
    line: u32,
    col: u32,
}

#[derive(Serialize)]
struct JsonLabel {
    start: JsonPosition,
    end: JsonPosition,
    label: Option<String>,
    primary: bool,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    level: &'a str,
    code: &'a str,
    message: &'a str,
    help: Option<&'a str>,
    source_name: Option<String>,
    labels: Vec<JsonLabel>,
}

/// One JSON object per line (NDJSON).
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, writer: &mut dyn Write, source: &Source, diagnostic: &Diagnostic) -> std::io::Result<()> {
        let labels = diagnostic
            .labels
            .iter()
            .map(|label| {
                let start = source.line_column(label.span.start);
                let end = source.line_column(label.span.end);
                JsonLabel {
                    start: JsonPosition { line: start.line.get(), col: start.column.get() },
                    end: JsonPosition { line: end.line.get(), col: end.column.get() },
                    label: label.label.clone(),
                    primary: label.primary,
                }
            })
            .collect();
        let record = JsonDiagnostic {
            level: diagnostic.severity.as_str(),
            code: diagnostic.code,
            message: &diagnostic.message,
            help: diagnostic.help.as_deref(),
            source_name: diagnostic
                .source_name
                .as_ref()
                .map(|p| p.display().to_string())
                .or_else(|| Some(source.name().display().to_string())),
            labels,
        };
        let line = serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string());
        writeln!(writer, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zlint_span::Span;

    fn sample_diagnostic() -> Diagnostic {
        Diagnostic::new("unused-decls", Severity::Warning, "`x` is declared but never used", Span::new(6, 7))
    }

    #[test]
    fn github_formatter_matches_literal_scenario() {
        let source = Source::new("a.zig", "const x = 1;\n");
        let diagnostic = sample_diagnostic();
        let mut buf = Vec::new();
        GithubFormatter.format(&mut buf, &source, &diagnostic).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.trim_end(),
            "::warning file=a.zig,line=1,col=7,title=unused-decls::`x` is declared but never used"
        );
    }

    #[test]
    fn json_formatter_emits_one_line() {
        let source = Source::new("a.zig", "const x = 1;\n");
        let diagnostic = sample_diagnostic();
        let mut buf = Vec::new();
        JsonFormatter.format(&mut buf, &source, &diagnostic).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"code\":\"unused-decls\""));
    }

    #[test]
    fn graphical_formatter_includes_source_context() {
        let source = Source::new("a.zig", "const x = 1;\n");
        let diagnostic = sample_diagnostic();
        let mut buf = Vec::new();
        GraphicalFormatter::new(false).format(&mut buf, &source, &diagnostic).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("const x = 1;"));
        assert!(text.contains("a.zig:1:7"));
    }

    #[test]
    fn graphical_formatter_snapshot_single_line() {
        let source = Source::new("a.zig", "const x = 1;\n");
        let diagnostic = sample_diagnostic();
        let mut buf = Vec::new();
        GraphicalFormatter::new(false).format(&mut buf, &source, &diagnostic).unwrap();
        insta::assert_snapshot!(String::from_utf8(buf).unwrap(), @r###"
        warning[unused-decls]: `x` is declared but never used
          --> a.zig:1:7
        1 | const x = 1;
          |       ^

        "###);
    }

    #[test]
    fn graphical_formatter_snapshot_multiline_with_help() {
        let source = Source::new("a.zig", "const x = 1;\nconst y = undefined;\n");
        let diagnostic = Diagnostic::new(
            "unsafe-undefined",
            Severity::Warning,
            "initializing a binding with `undefined` leaves it unsafe to read before assignment",
            Span::new(23, 32),
        )
        .with_help("assign a concrete value, or document why the binding is write-only until later");
        let mut buf = Vec::new();
        GraphicalFormatter::new(false).format(&mut buf, &source, &diagnostic).unwrap();
        insta::assert_snapshot!(String::from_utf8(buf).unwrap(), @r###"
        warning[unsafe-undefined]: initializing a binding with `undefined` leaves it unsafe to read before assignment
          --> a.zig:2:11
        2 | const y = undefined;
          |           ^^^^^^^^^
          help: assign a concrete value, or document why the binding is write-only until later

        "###);
    }

    #[test]
    fn graphical_formatter_handles_crlf_line_endings() {
        let source = Source::new("a.zig", "const x = 1;\r\nconst y = undefined;\r\n");
        let diagnostic = Diagnostic::new(
            "unsafe-undefined",
            Severity::Warning,
            "initializing a binding with `undefined` leaves it unsafe to read before assignment",
            Span::new(24, 33),
        );
        let mut buf = Vec::new();
        GraphicalFormatter::new(false).format(&mut buf, &source, &diagnostic).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("const y = undefined;"));
        assert!(!text.contains('\r'));
    }
}
