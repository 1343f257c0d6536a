//! Lexical extraction of quoted include directives.
//!
//! This is a heuristic textual scan, not a preprocessor: conditional
//! compilation, macro-expanded includes, and directives sitting inside
//! comments or string literals are not understood. Angle-bracket includes
//! name system headers and never participate in the dependency graph.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::BundleConfig;

/// Returns the compiled include-directive regex.
///
/// Matches a line that, after optional leading whitespace, starts with a
/// quoted `#include` directive. The single capture group is the name between
/// the quotes.
pub fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^[\t ]*#include\s*"(.*?)""#).expect("invalid include regex pattern")
    })
}

/// One include directive found in a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeTarget {
    /// The name exactly as written between the quotes.
    pub name: String,
    /// Candidate absolute path: the name joined onto the header root if its
    /// extension marks it as a header, onto the source root otherwise.
    pub path: PathBuf,
}

/// Scans file text for quoted include directives, in order of appearance.
#[must_use]
pub fn extract_includes(content: &str, config: &BundleConfig) -> Vec<IncludeTarget> {
    include_re()
        .captures_iter(content)
        .map(|caps| {
            let name = caps[1].to_owned();
            let path = if config.is_header_name(&name) {
                config.header_root.join(&name)
            } else {
                config.source_root.join(&name)
            };
            IncludeTarget { name, path }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config() -> BundleConfig {
        BundleConfig::new(Path::new("/project"))
    }

    #[test]
    fn extracts_quoted_includes_in_order() {
        let source = "#include \"a.h\"\nint x;\n#include \"b.h\"\n";
        let targets = extract_includes(source, &config());
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a.h", "b.h"]);
    }

    #[test]
    fn ignores_angle_bracket_includes() {
        let source = "#include <stdio.h>\n#include \"utils.h\"\n";
        let targets = extract_includes(source, &config());
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "utils.h");
    }

    #[test]
    fn allows_leading_whitespace_but_not_other_text() {
        let source = "\t #include \"a.h\"\nint y; #include \"b.h\"\n";
        let targets = extract_includes(source, &config());
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "a.h");
    }

    #[test]
    fn classifies_headers_and_sources_against_their_roots() {
        let source = "#include \"compiler/Lexer.h\"\n#include \"utils.c\"\n";
        let targets = extract_includes(source, &config());
        assert_eq!(
            targets[0].path,
            Path::new("/project/include/compiler/Lexer.h")
        );
        assert_eq!(targets[1].path, Path::new("/project/src/utils.c"));
    }

    #[test]
    fn duplicate_includes_are_kept() {
        let source = "#include \"a.h\"\n#include \"a.h\"\n";
        assert_eq!(extract_includes(source, &config()).len(), 2);
    }
}
