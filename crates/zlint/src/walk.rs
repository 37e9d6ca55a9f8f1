//! Expands CLI-supplied paths into a flat list of `.zig` files, walking
//! directories with the `ignore` crate the way ripgrep (and the teacher's
//! own file-discovery layer) does: `.gitignore`-aware, skipping hidden
//! directories, plus a fixed skip-list and the config's own `ignore`
//! glob patterns.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

const ALWAYS_SKIPPED_DIRS: &[&str] = &["zig-out", "vendor", ".zig-cache"];

fn build_ignore_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        } else {
            log::warn!("ignoring malformed glob pattern `{pattern}` in configuration");
        }
    }
    builder.build().unwrap_or_else(|_| GlobSetBuilder::new().build().unwrap())
}

fn is_skipped(path: &Path, ignore_set: &GlobSet) -> bool {
    if path
        .components()
        .any(|c| matches!(c, std::path::Component::Normal(name) if ALWAYS_SKIPPED_DIRS.iter().any(|skip| name == *skip)))
    {
        return true;
    }
    ignore_set.is_match(path)
}

/// Collects every `.zig` file reachable from `roots`, honoring `.gitignore`,
/// hidden-file conventions, the fixed skip-list, and `ignore_patterns`
/// from `zlint.json`.
pub fn collect_zig_files(roots: &[PathBuf], ignore_patterns: &[String]) -> Vec<PathBuf> {
    let ignore_set = build_ignore_set(ignore_patterns);
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            if !is_skipped(root, &ignore_set) {
                files.push(root.clone());
            }
            continue;
        }

        let mut walker = WalkBuilder::new(root);
        walker.hidden(true).git_ignore(true);
        for entry in walker.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("error walking directory: {err}");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_some_and(|ft| ft.is_file())
                && path.extension().is_some_and(|ext| ext == "zig")
                && !is_skipped(path, &ignore_set)
            {
                files.push(path.to_path_buf());
            }
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn collects_zig_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::File::create(dir.path().join("src/a.zig")).unwrap().write_all(b"const x = 1;\n").unwrap();
        std::fs::File::create(dir.path().join("README.md")).unwrap();

        let files = collect_zig_files(&[dir.path().to_path_buf()], &[]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/a.zig"));
    }

    #[test]
    fn skips_the_fixed_skip_list_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("vendor")).unwrap();
        std::fs::File::create(dir.path().join("vendor/dep.zig")).unwrap().write_all(b"const x = 1;\n").unwrap();

        let files = collect_zig_files(&[dir.path().to_path_buf()], &[]);
        assert!(files.is_empty());
    }

    #[test]
    fn honors_configured_ignore_globs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::File::create(dir.path().join("bad.zig")).unwrap().write_all(b"const x = 1;\n").unwrap();

        let files = collect_zig_files(&[dir.path().to_path_buf()], &["**/bad.zig".to_string()]);
        assert!(files.is_empty());
    }
}
