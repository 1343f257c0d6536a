//! Flattening: copying the reachable set into a single-namespace directory
//! and rewriting include directives to reference flattened basenames.

use std::fs;
use std::path::Path;

use crate::catalog::{FileCatalog, FileId};
use crate::error::BundleError;
use crate::includes::include_re;
use crate::output::display_path;
use crate::report::{Report, Warning};
use rustc_hash::FxHashSet;

/// Copies every file in `reachable` into `dest` under its basename, with
/// include directives rewritten, and returns the number of files written.
///
/// Each quoted include directive is resolved by basename against the
/// discovered file set and replaced with a directive referencing the
/// flattened name, annotated with a trailing comment naming the original
/// relative path it came from. A directive whose basename matches no
/// discovered file keeps its name and is annotated as unresolved — the copy
/// still happens, the degradation is recorded as a warning, and the step as
/// a whole still succeeds.
///
/// Files are processed in catalog order so repeated runs over an unchanged
/// input produce byte-identical output.
///
/// # Errors
///
/// Fails with [`BundleError::Io`] if a file cannot be read back or written.
pub fn flatten(
    catalog: &FileCatalog,
    reachable: &FxHashSet<FileId>,
    dest: &Path,
    report: &mut Report,
) -> Result<usize, BundleError> {
    let mut files: Vec<FileId> = reachable.iter().copied().collect();
    files.sort_unstable();

    let mut written = 0;
    for id in files {
        let record = catalog.get(id);
        let bytes = fs::read(&record.path).map_err(|source| BundleError::Io {
            path: record.path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let rewritten = rewrite_includes(&text, catalog, id, report);

        let target = dest.join(&record.name);
        fs::write(&target, rewritten).map_err(|source| BundleError::Io {
            path: target.clone(),
            source,
        })?;
        written += 1;
    }

    Ok(written)
}

/// Rewrites every quoted include directive in `source` to its flattened
/// form, accumulating a warning per directive that fails to resolve.
#[must_use]
pub fn rewrite_includes(
    source: &str,
    catalog: &FileCatalog,
    origin: FileId,
    report: &mut Report,
) -> String {
    include_re()
        .replace_all(source, |caps: &regex::Captures<'_>| {
            let written = &caps[1];
            let basename = written.rsplit(['/', '\\']).next().unwrap_or(written);

            match catalog.find_by_name(basename) {
                Some(id) => {
                    let target = catalog.get(id);
                    format!(
                        "#include \"{}\" // Included from \"{}\"",
                        target.name,
                        display_path(&target.relative)
                    )
                }
                None => {
                    report.warn(Warning::UnresolvedInclude {
                        file: display_path(&catalog.get(origin).relative),
                        name: written.to_owned(),
                    });
                    format!("#include \"{basename}\" // Included from \"<failed to resolve>\"")
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(files: &[&str]) -> FileCatalog {
        let mut catalog = FileCatalog::new(Path::new("/project"));
        for file in files {
            catalog.discover(&Path::new("/project").join(file));
        }
        catalog
    }

    #[test]
    fn rewrites_to_flattened_basename_with_provenance() {
        let catalog = catalog_with(&["src/main.c", "include/compiler/Lexer.h"]);
        let origin = catalog.discovered()[0];
        let mut report = Report::default();

        let out = rewrite_includes(
            "#include \"compiler/Lexer.h\"\n",
            &catalog,
            origin,
            &mut report,
        );
        assert_eq!(
            out,
            "#include \"Lexer.h\" // Included from \"include/compiler/Lexer.h\"\n"
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn unresolved_include_keeps_name_and_warns() {
        let catalog = catalog_with(&["src/main.c"]);
        let origin = catalog.discovered()[0];
        let mut report = Report::default();

        let out = rewrite_includes("#include \"ghost.h\"\n", &catalog, origin, &mut report);
        assert_eq!(
            out,
            "#include \"ghost.h\" // Included from \"<failed to resolve>\"\n"
        );
        assert_eq!(
            report.warnings,
            vec![Warning::UnresolvedInclude {
                file: "src/main.c".to_owned(),
                name: "ghost.h".to_owned(),
            }]
        );
    }

    #[test]
    fn angle_includes_and_other_lines_pass_through() {
        let catalog = catalog_with(&["src/main.c"]);
        let origin = catalog.discovered()[0];
        let mut report = Report::default();

        let source = "#include <stdio.h>\nint main(void) { return 0; }\n";
        let out = rewrite_includes(source, &catalog, origin, &mut report);
        assert_eq!(out, source);
    }

    #[test]
    fn trailing_text_after_the_directive_is_preserved() {
        let catalog = catalog_with(&["src/main.c", "include/utils.h"]);
        let origin = catalog.discovered()[0];
        let mut report = Report::default();

        let out = rewrite_includes(
            "#include \"utils.h\" /* helpers */\n",
            &catalog,
            origin,
            &mut report,
        );
        assert_eq!(
            out,
            "#include \"utils.h\" // Included from \"include/utils.h\" /* helpers */\n"
        );
    }
}
