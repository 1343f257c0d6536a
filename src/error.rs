//! Fatal error channel of a bundling run.
//!
//! Everything in here aborts the run with a non-zero exit status before the
//! output directory can be mistaken for a valid package. Non-fatal findings
//! go through the accumulating warning channel in [`crate::report`] instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a bundling run.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Two distinct files would collapse onto the same basename in the
    /// flattened namespace.
    #[error("duplicate file names \"{first}\" and \"{second}\"")]
    DuplicateName {
        /// The colliding basename.
        name: String,
        /// Relative path of the file seen first.
        first: String,
        /// Relative path of the file seen second.
        second: String,
    },

    /// An include target could not be read while resolving the file that
    /// references it.
    #[error("cannot read \"{target}\" (included from \"{referenced_by}\"): {source}")]
    UnreadableDependency {
        /// Relative path of the unreadable include target.
        target: String,
        /// Relative path of the file whose include directive named it.
        referenced_by: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A discovered source file could not be read.
    #[error("cannot read \"{path}\": {source}")]
    UnreadableSource {
        /// Relative path of the unreadable file.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The designated entry file does not exist.
    #[error("entry file \"{0}\" does not exist")]
    MissingEntry(String),

    /// The project Makefile could not be read.
    #[error("cannot read Makefile at \"{path}\": {source}")]
    UnreadableMakefile {
        /// Path of the Makefile that was looked for.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A required build variable is absent from the project Makefile.
    #[error("missing or invalid variable \"{0}\" in Makefile")]
    MissingBuildVar(&'static str),

    /// An I/O failure while preparing or writing the output directory.
    #[error("failed to access \"{path}\": {source}")]
    Io {
        /// Path the operation failed on.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
