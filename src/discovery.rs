//! Recursive discovery of candidate project files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use walkdir::WalkDir;

/// Recursively collects files under `dir` whose extension is in
/// `extensions`. A missing directory yields an empty list.
///
/// Results are sorted so the catalog, the resolution order, and ultimately
/// the flattened output are deterministic across runs.
#[must_use]
pub fn collect_files(dir: &Path, extensions: &FxHashSet<String>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && path
                    .extension()
                    .and_then(OsStr::to_str)
                    .is_some_and(|ext| extensions.contains(ext))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn exts(list: &[&str]) -> FxHashSet<String> {
        list.iter().map(|&e| e.to_owned()).collect()
    }

    #[test]
    fn collects_only_matching_extensions_recursively() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("main.c"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("nested/util.c"), "").unwrap();

        let files = collect_files(dir.path(), &exts(&["c"]));
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "c"));
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let files = collect_files(&dir.path().join("nope"), &exts(&["c"]));
        assert!(files.is_empty());
    }

    #[test]
    fn results_are_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.c"), "").unwrap();
        fs::write(dir.path().join("a.c"), "").unwrap();
        let files = collect_files(dir.path(), &exts(&["c"]));
        assert!(files[0].ends_with("a.c"));
        assert!(files[1].ends_with("b.c"));
    }
}
