//! Thread-safe diagnostic sink shared by every worker in the engine's pool.
//! Aggregate counters are plain atomics (no lock needed: each is an
//! independent running total); the writer itself is behind a mutex so two
//! files' diagnostics never interleave mid-line.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use zlint_diagnostics::{Diagnostic, Severity};
use zlint_source::Source;

use crate::formatters::Formatter;

#[derive(Debug, Default)]
pub struct ReportStats {
    pub files: AtomicU64,
    pub errors: AtomicU64,
    pub warnings: AtomicU64,
    pub notices: AtomicU64,
}

impl ReportStats {
    fn record(&self, severity: Severity) {
        match severity {
            Severity::Error => self.errors.fetch_add(1, Ordering::Relaxed),
            Severity::Warning => self.warnings.fetch_add(1, Ordering::Relaxed),
            Severity::Notice => self.notices.fetch_add(1, Ordering::Relaxed),
            Severity::Off => return,
        };
    }
}

/// Serializes writes from however many worker threads are emitting
/// diagnostics concurrently. `quiet` drops non-error diagnostics from
/// output but still counts them in the summary.
pub struct Reporter<W: Write> {
    writer: Mutex<W>,
    formatter: Box<dyn Formatter>,
    stats: ReportStats,
    quiet: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(writer: W, formatter: Box<dyn Formatter>, quiet: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            formatter,
            stats: ReportStats::default(),
            quiet,
        }
    }

    pub fn stats(&self) -> &ReportStats {
        &self.stats
    }

    /// Reports every diagnostic found in one file: updates the stats, then
    /// formats and writes each one (in the order given, which the engine
    /// guarantees is source-position order) inside a single lock
    /// acquisition so they stay contiguous in the output stream.
    pub fn report_error_slice(&self, source: &Source, diagnostics: &[Diagnostic]) {
        self.stats.files.fetch_add(1, Ordering::Relaxed);
        for diagnostic in diagnostics {
            self.stats.record(diagnostic.severity);
        }
        if diagnostics.is_empty() {
            return;
        }
        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for diagnostic in diagnostics {
            if self.quiet && diagnostic.severity != Severity::Error {
                continue;
            }
            let _ = self.formatter.format(&mut *writer, source, diagnostic);
        }
    }

    /// Prints the trailing summary line. Always the last line written,
    /// since the engine only calls this after every file has been
    /// dispatched.
    pub fn print_stats(&self, duration_ms: u128) {
        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let files = self.stats.files.load(Ordering::Relaxed);
        let errors = self.stats.errors.load(Ordering::Relaxed);
        let warnings = self.stats.warnings.load(Ordering::Relaxed);
        let notices = self.stats.notices.load(Ordering::Relaxed);
        let _ = writeln!(
            writer,
            "checked {files} file(s) in {duration_ms}ms: {errors} error(s), {warnings} warning(s), {notices} notice(s)"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::JsonFormatter;
    use zlint_span::Span;

    #[test]
    fn quiet_mode_still_counts_suppressed_diagnostics() {
        let reporter = Reporter::new(Vec::new(), Box::new(JsonFormatter), true);
        let source = Source::new("a.zig", "const x = 1;\n");
        let diagnostics = vec![Diagnostic::new("empty-file", Severity::Notice, "m", Span::new(0, 0))];
        reporter.report_error_slice(&source, &diagnostics);
        assert_eq!(reporter.stats().notices.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn stats_line_is_printed_once_per_run() {
        let reporter = Reporter::new(Vec::new(), Box::new(JsonFormatter), false);
        reporter.print_stats(12);
    }
}
