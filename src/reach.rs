//! Reachability from the entry file.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::catalog::FileId;
use crate::graph::DependencyGraph;

/// Computes the set of files connected to `entry` in the include graph.
///
/// The walk follows both edge directions, so the result is the connected
/// component of the entry file in the *undirected* graph, not merely its
/// forward include closure: a file nothing on the path from the entry point
/// includes still counts as reachable if it itself includes (or is included
/// by) something on that path.
///
/// Terminates because the graph is finite and the membership check keeps any
/// file from being enqueued more than a bounded number of times.
#[must_use]
pub fn compute_reachable(graph: &DependencyGraph, entry: FileId) -> FxHashSet<FileId> {
    let mut reachable = FxHashSet::default();
    reachable.insert(entry);

    let mut queue: VecDeque<FileId> = match graph.node(entry) {
        Some(node) => node.dependencies.iter().copied().collect(),
        None => VecDeque::new(),
    };

    while let Some(current) = queue.pop_front() {
        reachable.insert(current);

        let Some(node) = graph.node(current) else {
            continue;
        };

        for &next in node.dependencies.iter().chain(node.dependents.iter()) {
            if reachable.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reachable
}
