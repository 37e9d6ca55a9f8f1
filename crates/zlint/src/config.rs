//! Resolves `zlint.json` by walking up from a starting directory, the way
//! `ruff_linter::pyproject_toml` walks for `pyproject.toml`, and turns
//! unrecognized rule names into `invalid-config` diagnostics instead of
//! silently dropping them.

use std::path::{Path, PathBuf};

use thiserror::Error;

use zlint_diagnostics::{Diagnostic, Severity};
use zlint_linter::{LinterSettings, RawConfig};
use zlint_source::Source;
use zlint_span::Span;

pub const CONFIG_FILE_NAME: &str = "zlint.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Walks `start_dir` and its ancestors looking for `zlint.json`, stopping
/// at the first one found (or the filesystem root).
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Loads and resolves settings starting from `start_dir`. When no
/// `zlint.json` is found anywhere up the tree, every rule runs at its
/// documented default severity. Unknown rule keys are reported as
/// `invalid-config` diagnostics against a synthetic single-line source
/// built from the config file's own text, rather than silently ignored.
pub fn resolve_settings(start_dir: &Path) -> Result<(LinterSettings, Vec<Diagnostic>), ConfigError> {
    let Some(config_path) = find_config(start_dir) else {
        return Ok((LinterSettings::new(), Vec::new()));
    };

    let text = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
        path: config_path.clone(),
        source,
    })?;
    let raw: RawConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: config_path.clone(),
        source,
    })?;

    let (settings, unknown) = LinterSettings::from_raw(raw);
    let source = Source::new(config_path, text);
    let diagnostics = unknown
        .into_iter()
        .map(|rule| {
            let span = span_of_key(source.text(), &rule.name);
            Diagnostic::new(
                "invalid-config",
                Severity::Error,
                format!("unknown rule `{}` in {}", rule.name, source.name().display()),
                span,
            )
            .with_source_name(source.name())
        })
        .collect();

    Ok((settings, diagnostics))
}

/// Finds the byte span of the quoted `"<name>"` key in the raw config text,
/// so an `invalid-config` diagnostic points at the offending token instead
/// of an empty span. Falls back to `Span::EMPTY` if the key can't be found
/// verbatim (e.g. it was written with escape sequences).
fn span_of_key(text: &str, name: &str) -> Span {
    let needle = format!("\"{name}\"");
    match text.find(&needle) {
        Some(start) => Span::new(start as u32, (start + needle.len()) as u32),
        None => Span::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn finds_config_in_an_ancestor_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        writeln!(file, "{{}}").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn returns_none_when_no_config_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config(dir.path()).is_none());
    }

    #[test]
    fn unknown_rule_names_become_invalid_config_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        writeln!(file, r#"{{"rules": {{"not-a-rule": "error"}}}}"#).unwrap();

        let (_, diagnostics) = resolve_settings(dir.path()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "invalid-config");
        assert_ne!(diagnostics[0].labels[0].span, zlint_span::Span::EMPTY);
    }

    #[test]
    fn invalid_config_diagnostic_points_at_the_offending_key() {
        let text = r#"{"rules": {"not-a-rule": "error"}}"#;
        let span = span_of_key(text, "not-a-rule");
        assert_eq!(span.text(text), "\"not-a-rule\"");
    }

    #[test]
    fn span_of_key_falls_back_to_empty_when_not_found() {
        let span = span_of_key(r#"{"rules": {}}"#, "missing-rule");
        assert_eq!(span, zlint_span::Span::EMPTY);
    }
}
