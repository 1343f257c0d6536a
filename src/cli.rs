//! Command line interface definition.

use clap::Parser;
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (cbundle.toml or .cbundle.toml):
  Create this file in your project root to set defaults.
  Command line flags override file values.

  [bundle]
  source_dir = \"src\"            # Source subtree, scanned recursively
  include_dir = \"include\"       # Header subtree, scanned recursively
  entry = \"src/main.c\"          # Entry file reachability starts from
  output = \"deploy/output\"      # Output root; the flattened project lands in <output>/project
  makefile = \"Makefile\"         # Makefile the build variables are lifted from
  source_extensions = [\"c\"]
  header_extensions = [\"h\"]
";

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cbundle - flattens a single-entry-point C project into a self-contained, distributable directory",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Project root directory.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Source subtree, relative to the project root.
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Header subtree, relative to the project root.
    #[arg(long)]
    pub include_dir: Option<PathBuf>,

    /// Entry file the program starts from, relative to the project root.
    #[arg(long)]
    pub entry: Option<PathBuf>,

    /// Output root directory, relative to the project root.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Makefile to lift build variables from, relative to the project root.
    #[arg(long)]
    pub makefile: Option<PathBuf>,

    /// Extension treated as a source file (repeatable).
    #[arg(long = "source-ext")]
    pub source_extensions: Vec<String>,

    /// Extension treated as a header file (repeatable).
    #[arg(long = "header-ext")]
    pub header_extensions: Vec<String>,

    /// Emit the report as JSON on stdout instead of human-readable output.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose progress output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
