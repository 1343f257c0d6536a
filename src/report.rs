//! Warning channel and run summary.
//!
//! Warnings accumulate in a [`Report`] value instead of being logged inline
//! from deep inside the pipeline, so callers (and tests) can inspect them
//! independently of whether the run succeeded.

use std::fmt;

use serde::Serialize;

/// A non-fatal finding surfaced at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A discovered file that no resolved file includes.
    DeadFile {
        /// Relative path of the file.
        path: String,
    },
    /// A discovered file outside the entry file's connected component.
    UnreachableFile {
        /// Relative path of the file.
        path: String,
    },
    /// An include directive whose basename matches no discovered file.
    UnresolvedInclude {
        /// Relative path of the file carrying the directive.
        file: String,
        /// The include name as written.
        name: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadFile { path } => {
                write!(
                    f,
                    "File \"{path}\" is not included in project! This file will be ignored!"
                )
            }
            Self::UnreachableFile { path } => {
                write!(
                    f,
                    "File \"{path}\" is not reachable from the entry file! This file will be ignored!"
                )
            }
            Self::UnresolvedInclude { file, name } => {
                write!(f, "Failed to resolve include \"{name}\" in \"{file}\"!")
            }
        }
    }
}

/// Accumulated outcome of a bundling run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Non-fatal findings, in the order the pipeline produced them.
    pub warnings: Vec<Warning>,
    /// Files found by the directory walk.
    pub files_discovered: usize,
    /// Size of the entry file's connected component.
    pub files_reachable: usize,
    /// Files written into the flattened project directory.
    pub files_written: usize,
}

impl Report {
    /// Records a warning.
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
