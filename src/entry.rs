//! Shared entry point: CLI parsing, configuration resolution, and the
//! bundling pipeline itself.
//!
//! The pipeline is single-threaded and synchronous: every phase runs to
//! completion before the next begins, and a fatal error aborts the run
//! before the output directory could be mistaken for a valid package.

use std::fs;
use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use walkdir::WalkDir;

use crate::catalog::{FileCatalog, FileId};
use crate::cli::Cli;
use crate::config::{BundleConfig, FileConfig};
use crate::discovery::collect_files;
use crate::error::BundleError;
use crate::flatten::flatten;
use crate::graph::DependencyGraph;
use crate::makefile::{extract_build_vars, render_makefile};
use crate::output::{self, display_path};
use crate::reach::compute_reachable;
use crate::report::{Report, Warning};
use crate::validate::validate_names;

/// Runs the bundler with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error only if writing output fails; pipeline failures are
/// reported and mapped to the returned exit code.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the bundler with the given arguments, writing output to `writer`.
///
/// This is the testable version of [`run_with_args`] that allows output
/// capture.
///
/// # Errors
///
/// Returns an error only if writing output fails.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["cbundle".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(cli) => cli,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, captured by the writer
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    let file_config = FileConfig::load_from(&cli.root);
    let config = match BundleConfig::resolve(&cli, &file_config.bundle) {
        Ok(config) => config,
        Err(err) => {
            output::error(&format!("Failed to bundle project: {err}"));
            return Ok(1);
        }
    };

    if config.verbose && !config.json {
        eprintln!("[VERBOSE] cbundle v{}", env!("CARGO_PKG_VERSION"));
        if let Some(path) = &file_config.config_file_path {
            eprintln!("[VERBOSE] Configuration file: {}", path.display());
        }
        eprintln!("[VERBOSE] Entry: {}", config.entry.display());
        eprintln!("[VERBOSE] Output: {}", config.output_dir.display());
    }

    let started = Instant::now();
    match run_bundle(&config, writer) {
        Ok(report) => {
            output::print_report(writer, &report, config.json)?;
            if !config.json {
                output::info(
                    writer,
                    &format!("Done in {}ms", started.elapsed().as_millis()),
                )?;
            }
            Ok(0)
        }
        Err(err) => {
            output::error(&format!("Failed to bundle project: {err}"));
            Ok(1)
        }
    }
}

/// Executes the full bundling pipeline against a resolved configuration and
/// returns the accumulated report.
///
/// # Errors
///
/// Any [`BundleError`] aborts the pipeline at the phase that produced it;
/// nothing after that phase runs.
pub fn run_bundle<W: Write>(config: &BundleConfig, writer: &mut W) -> Result<Report> {
    let mut report = Report::default();
    let chatty = !config.json;

    if chatty {
        output::info(writer, "Preparing...")?;
    }
    prepare_output_dirs(config)?;

    if chatty {
        output::info(writer, "Collecting project files...")?;
    }
    let mut catalog = FileCatalog::new(&config.root);
    let source_ids: Vec<FileId> = collect_files(&config.source_root, &config.source_extensions)
        .iter()
        .map(|path| catalog.discover(path))
        .collect();
    let header_ids: Vec<FileId> = collect_files(&config.header_root, &config.header_extensions)
        .iter()
        .map(|path| catalog.discover(path))
        .collect();
    let discovered: Vec<FileId> = source_ids.iter().chain(&header_ids).copied().collect();
    report.files_discovered = discovered.len();

    if chatty {
        output::info(writer, "Resolving dependencies...")?;
    }
    let mut graph = DependencyGraph::default();
    for &source in &source_ids {
        graph.resolve(&mut catalog, config, source)?;
    }

    // Files nothing resolved into the graph were never included by anything.
    for &id in &discovered {
        if !graph.contains(id) {
            report.warn(Warning::DeadFile {
                path: display_path(&catalog.get(id).relative),
            });
        }
    }

    if chatty {
        output::info(writer, "Checking reachability...")?;
    }
    if !config.entry.exists() {
        return Err(
            BundleError::MissingEntry(display_path(config.relative(&config.entry))).into(),
        );
    }
    let entry = catalog.intern(&config.entry);
    graph.resolve(&mut catalog, config, entry)?;
    let reachable = compute_reachable(&graph, entry);
    report.files_reachable = reachable.len();

    for &id in &discovered {
        if !reachable.contains(&id) {
            report.warn(Warning::UnreachableFile {
                path: display_path(&catalog.get(id).relative),
            });
        }
    }

    if chatty {
        output::info(writer, "Validating...")?;
    }
    validate_names(&catalog)?;

    if chatty {
        output::info(writer, "Processing project files...")?;
    }
    let written = flatten(&catalog, &reachable, &config.project_dir, &mut report)?;
    report.files_written = written;

    if chatty {
        output::info(writer, "Generating Makefile...")?;
    }
    let makefile_text =
        fs::read_to_string(&config.makefile).map_err(|source| BundleError::UnreadableMakefile {
            path: config.makefile.clone(),
            source,
        })?;
    let vars = extract_build_vars(&makefile_text)?;
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let target = config.project_dir.join("Makefile");
    fs::write(&target, render_makefile(&vars, &date)).map_err(|source| BundleError::Io {
        path: target,
        source,
    })?;

    Ok(report)
}

/// Creates the output directory tree and clears files left over from a
/// previous run, keeping re-runs idempotent.
fn prepare_output_dirs(config: &BundleConfig) -> Result<(), BundleError> {
    fs::create_dir_all(&config.project_dir).map_err(|source| BundleError::Io {
        path: config.project_dir.clone(),
        source,
    })?;

    for entry in WalkDir::new(&config.output_dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if entry.file_type().is_file() {
            fs::remove_file(entry.path()).map_err(|source| BundleError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
