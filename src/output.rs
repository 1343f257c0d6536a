//! Human-readable and JSON rendering of run output.
//!
//! Informational progress goes to the injected writer (stdout in the
//! binary); warnings and fatal errors go to stderr so they survive output
//! redirection. Fatal errors render red, warnings yellow, and only fatal
//! errors map to a non-zero exit status.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::report::Report;

/// Normalizes a path for display: forward slashes on every platform, no
/// leading "./".
#[must_use]
pub fn display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Writes an informational progress line.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn info<W: Write>(writer: &mut W, message: &str) -> io::Result<()> {
    writeln!(writer, "{} {message}", "[INFO]".cyan().bold())
}

/// Prints a warning line to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {message}", "[WARN]".yellow().bold());
}

/// Prints a fatal error line to stderr.
pub fn error(message: &str) {
    eprintln!("{} {message}", "[ERROR]".red().bold());
}

/// Prints the accumulated warnings and the run summary.
///
/// With `json` set, the whole report is serialized to the writer instead and
/// nothing is printed to stderr.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn print_report<W: Write>(writer: &mut W, report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)?;
        return Ok(());
    }

    for warning in &report.warnings {
        warn(&warning.to_string());
    }

    let summary = format!(
        "Bundled {} of {} discovered files ({} reachable)",
        report.files_written, report.files_discovered, report.files_reachable
    );
    if report.warnings.is_empty() {
        writeln!(writer, "{}", format!("✓ {summary}").green())?;
    } else {
        writeln!(
            writer,
            "{} ({} warnings)",
            summary,
            report.warnings.len().to_string().yellow()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_path_uses_forward_slashes() {
        assert_eq!(display_path(Path::new(".\\src\\main.c")), "src/main.c");
        assert_eq!(display_path(Path::new("./src/main.c")), "src/main.c");
    }

    #[test]
    fn json_report_is_valid_json() {
        let report = Report::default();
        let mut out = Vec::new();
        print_report(&mut out, &report, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["files_written"], 0);
    }
}
