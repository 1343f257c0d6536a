//! `cbundle` packages a single-entry-point C project for distribution.
//!
//! The pipeline discovers every candidate source and header file, infers the
//! include graph from textual `#include "..."` directives, computes the set of
//! files connected to the entry file, and copies exactly that subset into a
//! flat single-namespace directory with rewritten include directives and a
//! regenerated Makefile.
//!
//! The crate is organised around the pipeline stages:
//! - [`discovery`]: recursive walk of the source and header subtrees
//! - [`catalog`]: interning of absolute paths into [`catalog::FileRecord`]s
//! - [`includes`]: lexical extraction of quoted include directives
//! - [`graph`]: bidirectional dependency graph, cycle safe
//! - [`reach`]: connected-component reachability from the entry file
//! - [`validate`]: flattened-namespace collision check
//! - [`flatten`]: copy plus include rewriting with provenance comments
//! - [`makefile`]: build-variable extraction and descriptor regeneration
//!
//! Compiling and archiving the flattened output are external concerns and are
//! deliberately not part of this crate.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod entry;
pub mod error;
pub mod flatten;
pub mod graph;
pub mod includes;
pub mod makefile;
pub mod output;
pub mod reach;
pub mod report;
pub mod validate;
