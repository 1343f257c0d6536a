//! Run configuration.
//!
//! A [`BundleConfig`] is constructed once at the top of a run — from the CLI
//! arguments layered over an optional `cbundle.toml` — and threaded through
//! every component. Nothing in the pipeline reads ambient global state.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::BundleError;

/// Candidate configuration file names, checked in order in the project root.
pub const CONFIG_FILENAMES: [&str; 2] = ["cbundle.toml", ".cbundle.toml"];

/// Top-level on-disk configuration struct.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FileConfig {
    /// The `[bundle]` table.
    #[serde(default)]
    pub bundle: BundleSection,
    /// The path the configuration was loaded from, `None` for defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

/// The `[bundle]` table of `cbundle.toml`. Every field is optional; unset
/// fields fall back to CLI flags and then to the default project layout.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct BundleSection {
    /// Source subtree, relative to the project root.
    pub source_dir: Option<PathBuf>,
    /// Header subtree, relative to the project root.
    pub include_dir: Option<PathBuf>,
    /// Entry file, relative to the project root.
    pub entry: Option<PathBuf>,
    /// Output root, relative to the project root.
    pub output: Option<PathBuf>,
    /// Makefile to lift build variables from, relative to the project root.
    pub makefile: Option<PathBuf>,
    /// Extensions treated as source files.
    pub source_extensions: Option<Vec<String>>,
    /// Extensions treated as header files.
    pub header_extensions: Option<Vec<String>>,
}

impl FileConfig {
    /// Loads configuration from the project root, or defaults if no file
    /// exists or it fails to parse.
    #[must_use]
    pub fn load_from(root: &Path) -> Self {
        for filename in CONFIG_FILENAMES {
            let candidate = root.join(filename);
            if !candidate.exists() {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&candidate) {
                if let Ok(mut config) = toml::from_str::<Self>(&content) {
                    config.config_file_path = Some(candidate);
                    return config;
                }
            }
        }
        Self::default()
    }
}

/// Fully resolved, immutable configuration for one bundling run.
///
/// All paths are absolute; extension sets are non-empty.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Absolute project root.
    pub root: PathBuf,
    /// Absolute source subtree root.
    pub source_root: PathBuf,
    /// Absolute header subtree root.
    pub header_root: PathBuf,
    /// Absolute entry file path.
    pub entry: PathBuf,
    /// Absolute output root; scratch space owned by the run.
    pub output_dir: PathBuf,
    /// Absolute flattened-project directory, inside `output_dir`.
    pub project_dir: PathBuf,
    /// Absolute path of the Makefile build variables are lifted from.
    pub makefile: PathBuf,
    /// Extensions (no leading dot) classified as source files.
    pub source_extensions: FxHashSet<String>,
    /// Extensions (no leading dot) classified as header files.
    pub header_extensions: FxHashSet<String>,
    /// Emit the report as JSON and suppress progress output.
    pub json: bool,
    /// Print extra diagnostics to stderr.
    pub verbose: bool,
}

impl BundleConfig {
    /// Creates a configuration with the default project layout rooted at
    /// `root`: sources in `src`, headers in `include`, entry `src/main.c`,
    /// output under `deploy/output`, Makefile in the root.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        let output_dir = root.join("deploy").join("output");
        Self {
            root: root.to_path_buf(),
            source_root: root.join("src"),
            header_root: root.join("include"),
            entry: root.join("src").join("main.c"),
            project_dir: output_dir.join("project"),
            output_dir,
            makefile: root.join("Makefile"),
            source_extensions: std::iter::once("c".to_owned()).collect(),
            header_extensions: std::iter::once("h".to_owned()).collect(),
            json: false,
            verbose: false,
        }
    }

    /// Resolves the effective configuration from CLI arguments layered over
    /// an optional configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the project root cannot be canonicalized.
    pub fn resolve(cli: &Cli, section: &BundleSection) -> Result<Self, BundleError> {
        let root = cli.root.canonicalize().map_err(|source| BundleError::Io {
            path: cli.root.clone(),
            source,
        })?;
        let mut config = Self::new(&root);

        if let Some(dir) = cli.source_dir.as_ref().or(section.source_dir.as_ref()) {
            config.source_root = root.join(dir);
        }
        if let Some(dir) = cli.include_dir.as_ref().or(section.include_dir.as_ref()) {
            config.header_root = root.join(dir);
        }
        if let Some(entry) = cli.entry.as_ref().or(section.entry.as_ref()) {
            config.entry = root.join(entry);
        }
        if let Some(output) = cli.output.as_ref().or(section.output.as_ref()) {
            config.output_dir = root.join(output);
            config.project_dir = config.output_dir.join("project");
        }
        if let Some(makefile) = cli.makefile.as_ref().or(section.makefile.as_ref()) {
            config.makefile = root.join(makefile);
        }
        if !cli.source_extensions.is_empty() {
            config.source_extensions = cli.source_extensions.iter().cloned().collect();
        } else if let Some(exts) = &section.source_extensions {
            config.source_extensions = exts.iter().cloned().collect();
        }
        if !cli.header_extensions.is_empty() {
            config.header_extensions = cli.header_extensions.iter().cloned().collect();
        } else if let Some(exts) = &section.header_extensions {
            config.header_extensions = exts.iter().cloned().collect();
        }

        config.json = cli.json;
        config.verbose = cli.verbose;
        Ok(config)
    }

    /// Whether an include-directive name refers to a header, judged by its
    /// extension alone.
    #[must_use]
    pub fn is_header_name(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.header_extensions.contains(ext))
    }

    /// Strips the project root from `path` for display; paths outside the
    /// root are returned unchanged.
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
