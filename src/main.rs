//! Main binary entry point for the `cbundle` project packager.
//!
//! This binary simply delegates to the shared `entry::run_with_args()`
//! function so the CLI and library callers behave identically.

use anyhow::Result;

fn main() -> Result<()> {
    let code = cbundle::entry::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
