//! File identity: an arena of [`FileRecord`]s interned by absolute path.
//!
//! Every component of the pipeline refers to files through [`FileId`] indices
//! into one [`FileCatalog`], so "same path" and "same file" mean the same
//! thing everywhere regardless of how a path was first encountered.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Index of one interned file in the catalog arena.
///
/// Ids are handed out in interning order, which makes sorting a set of ids a
/// deterministic processing order for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

/// Identity for one file on disk.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path; the unique interning key.
    pub path: PathBuf,
    /// Path relative to the project root, for diagnostics.
    pub relative: PathBuf,
    /// Basename; the identity in the flattened namespace.
    pub name: String,
    /// Extension without the leading dot; classifies header vs. source.
    pub extension: String,
}

/// Arena of [`FileRecord`]s indexed by [`FileId`] and interned by path.
///
/// Invariant: for a given absolute path, exactly one record exists for the
/// lifetime of a run. Re-interning a known path returns the existing id.
///
/// Files found by the directory walk are additionally tracked as the
/// *discovered* set, in walk order. Name lookup and namespace validation run
/// over that set only: a file that was interned merely because an include
/// directive pointed at it is an identity, not part of the project namespace.
pub struct FileCatalog {
    root: PathBuf,
    records: Vec<FileRecord>,
    by_path: FxHashMap<PathBuf, FileId>,
    discovered: Vec<FileId>,
}

impl FileCatalog {
    /// Creates an empty catalog; relative paths are computed against `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            records: Vec::new(),
            by_path: FxHashMap::default(),
            discovered: Vec::new(),
        }
    }

    /// Interns `path`, returning the existing id if the path is already known.
    pub fn intern(&mut self, path: &Path) -> FileId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }

        let relative = path
            .strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let id = FileId(self.records.len());
        self.records.push(FileRecord {
            path: path.to_path_buf(),
            relative,
            name,
            extension,
        });
        self.by_path.insert(path.to_path_buf(), id);
        id
    }

    /// Interns `path` and marks it as discovered by the directory walk.
    pub fn discover(&mut self, path: &Path) -> FileId {
        let id = self.intern(path);
        if !self.discovered.contains(&id) {
            self.discovered.push(id);
        }
        id
    }

    /// Returns the record for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this catalog.
    #[must_use]
    pub fn get(&self, id: FileId) -> &FileRecord {
        &self.records[id.0]
    }

    /// The files found by the directory walk, in walk order.
    #[must_use]
    pub fn discovered(&self) -> &[FileId] {
        &self.discovered
    }

    /// Looks a basename up among the discovered files, first match wins.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<FileId> {
        self.discovered
            .iter()
            .copied()
            .find(|&id| self.records[id.0].name == name)
    }

    /// Number of interned records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_id_for_same_path() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        let a = catalog.intern(Path::new("/project/src/main.c"));
        let b = catalog.intern(Path::new("/project/src/main.c"));
        assert_eq!(a, b);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn record_fields_are_derived_from_the_path() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        let id = catalog.intern(Path::new("/project/include/compiler/Lexer.h"));
        let record = catalog.get(id);
        assert_eq!(record.relative, Path::new("include/compiler/Lexer.h"));
        assert_eq!(record.name, "Lexer.h");
        assert_eq!(record.extension, "h");
    }

    #[test]
    fn path_outside_root_keeps_full_path_as_relative() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        let id = catalog.intern(Path::new("/elsewhere/util.c"));
        assert_eq!(catalog.get(id).relative, Path::new("/elsewhere/util.c"));
    }

    #[test]
    fn find_by_name_only_sees_discovered_files() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        catalog.intern(Path::new("/project/src/ghost.c"));
        assert_eq!(catalog.find_by_name("ghost.c"), None);

        let id = catalog.discover(Path::new("/project/src/real.c"));
        assert_eq!(catalog.find_by_name("real.c"), Some(id));
    }

    #[test]
    fn discover_does_not_duplicate_entries() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        catalog.discover(Path::new("/project/src/main.c"));
        catalog.discover(Path::new("/project/src/main.c"));
        assert_eq!(catalog.discovered().len(), 1);
    }
}
