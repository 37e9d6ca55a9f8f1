//! Parallel per-file linting: one rayon thread pool, one task per file.
//! Each task is strictly single-threaded — parsing, semantic analysis,
//! dispatch, and fixing all happen sequentially within it. Only the
//! reporter's writer is shared across tasks.

use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use zlint_directives::DirectiveSet;
use zlint_source::Source;

use zlint_codes::Rule;

use crate::context::LintContext;
use crate::dispatcher::RuleDispatcher;
use crate::fixer::{self, FixMode};
use crate::reporter::Reporter;
use crate::rules;
use crate::settings::LinterSettings;

/// One file's outcome: whether any error-severity diagnostic fired (what
/// the run's exit code depends on) and whether a fix rewrote the file on
/// disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOutcome {
    pub had_error: bool,
    pub had_warning: bool,
    pub fixed: bool,
}

impl FileOutcome {
    fn merge(self, other: FileOutcome) -> FileOutcome {
        FileOutcome {
            had_error: self.had_error || other.had_error,
            had_warning: self.had_warning || other.had_warning,
            fixed: self.fixed || other.fixed,
        }
    }
}

/// Orchestrates linting (and, optionally, fixing) of a list of files
/// using a shared thread pool sized to the logical core count unless the
/// caller overrides it.
pub struct LintEngine {
    settings: LinterSettings,
    fix_mode: FixMode,
    n_jobs: usize,
}

impl LintEngine {
    pub fn new(settings: LinterSettings, fix_mode: FixMode) -> Self {
        Self {
            settings,
            fix_mode,
            n_jobs: num_cpus::get(),
        }
    }

    #[must_use]
    pub fn with_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = n_jobs.max(1);
        self
    }

    /// Lints every file in `paths`, reporting through `reporter`. Returns
    /// the merged outcome across all files. A single file's I/O or parse
    /// failure is logged and does not stop the others (`5. CONCURRENCY &
    /// RESOURCE MODEL`'s per-file fatality contract).
    pub fn run<W: Write + Send>(&self, paths: &[PathBuf], reporter: &Reporter<W>) -> FileOutcome {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.n_jobs)
            .build()
            .expect("failed to build the linting thread pool");

        pool.install(|| {
            paths
                .par_iter()
                .map(|path| self.run_one(path, reporter))
                .reduce(FileOutcome::default, FileOutcome::merge)
        })
    }

    fn run_one<W: Write + Send>(&self, path: &Path, reporter: &Reporter<W>) -> FileOutcome {
        log::debug!("linting {}", path.display());
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("failed to read {}: {err}", path.display());
                return FileOutcome::default();
            }
        };

        let (parsed, comments) = zlint_syntax::parse_with_comments(&text);
        let source = Source::new(path.to_path_buf(), text.clone());
        if parsed.has_errors() {
            log::warn!("{} has {} parse error(s); skipping analysis", path.display(), parsed.errors.len());
            let diagnostics: Vec<_> = parsed
                .errors
                .iter()
                .map(|e| zlint_diagnostics::Diagnostic::new("parse-error", zlint_diagnostics::Severity::Error, e.to_string(), e.span()))
                .collect();
            reporter.report_error_slice(&source, &diagnostics);
            return FileOutcome { had_error: true, ..FileOutcome::default() };
        }

        let semantic = match zlint_semantic::build(&parsed.ast, &text) {
            Ok(model) => model,
            Err(err) => {
                log::warn!("semantic analysis failed for {}: {err}", path.display());
                let diagnostics = vec![zlint_diagnostics::Diagnostic::new(
                    "analysis-error",
                    zlint_diagnostics::Severity::Error,
                    err.to_string(),
                    zlint_span::Span::EMPTY,
                )];
                reporter.report_error_slice(&source, &diagnostics);
                return FileOutcome { had_error: true, ..FileOutcome::default() };
            }
        };

        let directives = DirectiveSet::from_source(&source, &comments);
        let ctx = LintContext::new(&parsed.ast, &semantic, &source, &self.settings);
        let dispatcher = RuleDispatcher::new(rules::catalog());
        let mut diagnostics = dispatcher.run(&ctx, &source, &directives);
        diagnostics.sort_by_key(|d| d.primary_span());

        let mut fixed = false;
        if self.fix_mode != FixMode::Off && diagnostics.iter().any(|d| d.fix.is_some()) {
            let outcome = fixer::apply_fixes(
                &text,
                &diagnostics,
                |d| Rule::from_name(d.code).map(Rule::fix_kind).unwrap_or(zlint_diagnostics::FixKind::NONE),
                self.fix_mode,
            );
            if outcome.fixed_count > 0 {
                if let Err(err) = std::fs::write(path, &outcome.source) {
                    log::warn!("failed to write fixed {}: {err}", path.display());
                } else {
                    fixed = true;
                }
            }
        }

        let had_error = diagnostics.iter().any(|d| d.severity == zlint_diagnostics::Severity::Error);
        let had_warning = diagnostics.iter().any(|d| d.severity == zlint_diagnostics::Severity::Warning);
        reporter.report_error_slice(&source, &diagnostics);

        FileOutcome { had_error, had_warning, fixed }
    }
}
