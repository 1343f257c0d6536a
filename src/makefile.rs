//! Build-descriptor handling: lifting the build variables out of the
//! project Makefile and regenerating a Makefile for the flattened directory.

use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::BundleError;

/// The variables a project Makefile must define.
pub const REQUIRED_VARS: [&str; 4] = ["COMPILER", "CFLAGS", "LIBS", "OUT"];

/// Returns the compiled build-variable assignment regex.
fn build_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(COMPILER|CFLAGS|LIBS|OUT)\s*=\s*(.+)$")
            .expect("invalid build variable regex pattern")
    })
}

/// Build variables lifted from the project Makefile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVars {
    /// `COMPILER =` value.
    pub compiler: String,
    /// `CFLAGS =` value.
    pub cflags: String,
    /// `LIBS =` value.
    pub libs: String,
    /// `OUT =` value.
    pub out: String,
}

/// Extracts the required build variables from Makefile text. When a variable
/// is assigned more than once the last assignment wins, matching `make`.
///
/// # Errors
///
/// Fails with [`BundleError::MissingBuildVar`] if any required variable is
/// missing or has an empty value.
pub fn extract_build_vars(text: &str) -> Result<BuildVars, BundleError> {
    let mut vars: FxHashMap<&str, String> = FxHashMap::default();
    for caps in build_var_re().captures_iter(text) {
        let name = match &caps[1] {
            "COMPILER" => "COMPILER",
            "CFLAGS" => "CFLAGS",
            "LIBS" => "LIBS",
            _ => "OUT",
        };
        vars.insert(name, caps[2].trim_end().to_owned());
    }

    for name in REQUIRED_VARS {
        if vars.get(name).is_none_or(String::is_empty) {
            return Err(BundleError::MissingBuildVar(name));
        }
    }

    Ok(BuildVars {
        compiler: vars.remove("COMPILER").unwrap_or_default(),
        cflags: vars.remove("CFLAGS").unwrap_or_default(),
        libs: vars.remove("LIBS").unwrap_or_default(),
        out: vars.remove("OUT").unwrap_or_default(),
    })
}

/// Renders the regenerated Makefile for the flattened directory.
///
/// The compile rule builds every `*.c` in place, which is all the flattened
/// namespace needs. `date` is injected by the caller so repeated runs can be
/// compared byte for byte.
#[must_use]
pub fn render_makefile(vars: &BuildVars, date: &str) -> String {
    format!(
        "#
# File: Makefile
# Author: cbundle
# Date: {date}
# Brief: This file is generated automatically. Do not edit!
#

COMPILER = {compiler}
CFLAGS = {cflags}
LIBS = {libs}
OUT = {out}

all: $(OUT)

$(OUT): $(wildcard *.c) $(wildcard *.h)
\t$(COMPILER) $(CFLAGS) $(LIBS) -o $(OUT) *.c

# End of file Makefile
",
        compiler = vars.compiler,
        cflags = vars.cflags,
        libs = vars.libs,
        out = vars.out,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAKEFILE: &str = "\
COMPILER = gcc
CFLAGS = -std=c99 -Wall -Wextra
LIBS = -lm
OUT = program

all: $(OUT)
";

    #[test]
    fn extracts_all_four_variables() {
        let vars = extract_build_vars(MAKEFILE).unwrap();
        assert_eq!(vars.compiler, "gcc");
        assert_eq!(vars.cflags, "-std=c99 -Wall -Wextra");
        assert_eq!(vars.libs, "-lm");
        assert_eq!(vars.out, "program");
    }

    #[test]
    fn last_assignment_wins() {
        let text = format!("{MAKEFILE}\nOUT = program2\n");
        let vars = extract_build_vars(&text).unwrap();
        assert_eq!(vars.out, "program2");
    }

    #[test]
    fn missing_variable_is_fatal() {
        let text = "COMPILER = gcc\nCFLAGS = -Wall\nLIBS = -lm\n";
        let err = extract_build_vars(text).unwrap_err();
        assert!(matches!(err, BundleError::MissingBuildVar("OUT")));
    }

    #[test]
    fn unrelated_assignments_are_ignored() {
        let text = format!("{MAKEFILE}\nEXTRA_FLAGS = -O2\n");
        let vars = extract_build_vars(&text).unwrap();
        assert_eq!(vars.cflags, "-std=c99 -Wall -Wextra");
    }

    #[test]
    fn rendered_makefile_embeds_variables_and_date() {
        let vars = extract_build_vars(MAKEFILE).unwrap();
        let rendered = render_makefile(&vars, "2024-01-01");
        assert!(rendered.contains("# Date: 2024-01-01"));
        assert!(rendered.contains("COMPILER = gcc"));
        assert!(rendered.contains("OUT = program"));
        assert!(rendered.contains("-o $(OUT) *.c"));
    }
}
