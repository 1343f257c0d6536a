//! Flattened-namespace validation.

use rustc_hash::FxHashMap;

use crate::catalog::{FileCatalog, FileId};
use crate::error::BundleError;
use crate::output::display_path;

/// Rejects any two discovered files that would collapse onto the same
/// basename in the flattened namespace.
///
/// Runs over the whole discovered set, not just the reachable subset: the
/// check protects the project namespace itself, so a collision between two
/// unreachable files is just as fatal. Must run before any file is copied.
///
/// # Errors
///
/// Fails with [`BundleError::DuplicateName`] on the first repeated basename.
pub fn validate_names(catalog: &FileCatalog) -> Result<(), BundleError> {
    let mut names: FxHashMap<&str, FileId> = FxHashMap::default();

    for &id in catalog.discovered() {
        let record = catalog.get(id);
        if let Some(&first) = names.get(record.name.as_str()) {
            return Err(BundleError::DuplicateName {
                name: record.name.clone(),
                first: display_path(&catalog.get(first).relative),
                second: display_path(&record.relative),
            });
        }
        names.insert(record.name.as_str(), id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn distinct_names_pass() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        catalog.discover(Path::new("/project/src/main.c"));
        catalog.discover(Path::new("/project/include/utils.h"));
        assert!(validate_names(&catalog).is_ok());
    }

    #[test]
    fn repeated_basename_across_paths_is_fatal() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        catalog.discover(Path::new("/project/src/a/utils.c"));
        catalog.discover(Path::new("/project/src/b/utils.c"));

        let err = validate_names(&catalog).unwrap_err();
        match err {
            BundleError::DuplicateName { name, first, second } => {
                assert_eq!(name, "utils.c");
                assert_eq!(first, "src/a/utils.c");
                assert_eq!(second, "src/b/utils.c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undiscovered_interned_files_do_not_count() {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        catalog.discover(Path::new("/project/src/main.c"));
        // Interned because an include directive pointed at it, but never
        // part of the discovered namespace.
        catalog.intern(Path::new("/project/elsewhere/main.c"));
        assert!(validate_names(&catalog).is_ok());
    }
}
