//! Bidirectional include-dependency graph.
//!
//! [`DependencyGraph::resolve`] walks a file and everything it transitively
//! includes with an explicit frame stack. A node is inserted into the graph
//! *before* its own dependency list is walked, so a cyclic include chain that
//! leads back to an in-progress file short-circuits on the node lookup
//! instead of looping. Node presence is the "visiting" state of the walk,
//! `resolved = true` the "visited" state.

use std::fs;

use rustc_hash::FxHashMap;

use crate::catalog::{FileCatalog, FileId};
use crate::config::BundleConfig;
use crate::error::BundleError;
use crate::includes::extract_includes;
use crate::output::display_path;

/// One resolved vertex in the dependency graph.
#[derive(Debug)]
pub struct GraphNode {
    /// The file this node represents.
    pub file: FileId,
    /// Files this file's text includes, in order of appearance. A file that
    /// includes the same target twice lists it twice.
    pub dependencies: Vec<FileId>,
    /// Files whose text includes this file (reverse edges, unordered).
    pub dependents: Vec<FileId>,
    /// True once this node's dependency list has been fully walked.
    pub resolved: bool,
}

/// The include graph over interned files, keyed by [`FileId`].
///
/// Kept symmetric at all times: whenever `B` appears in `A.dependencies`,
/// `A` appears in `B.dependents`.
#[derive(Default)]
pub struct DependencyGraph {
    nodes: FxHashMap<FileId, GraphNode>,
}

struct Frame {
    file: FileId,
    deps: Vec<FileId>,
    next: usize,
}

impl DependencyGraph {
    /// Returns the node for `id`, if the file has been resolved into the
    /// graph.
    #[must_use]
    pub fn node(&self, id: FileId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Whether `id` has a node in the graph.
    #[must_use]
    pub fn contains(&self, id: FileId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.values()
    }

    /// Resolves `file` and everything it transitively includes.
    ///
    /// Each file's text is read exactly once per run; calling this again for
    /// an already-resolved file returns immediately.
    ///
    /// # Errors
    ///
    /// Fails with [`BundleError::UnreadableDependency`] if an include target
    /// cannot be read, naming both the target and the file that referenced
    /// it. The unreadable file gets no node; files resolved earlier keep
    /// theirs.
    pub fn resolve(
        &mut self,
        catalog: &mut FileCatalog,
        config: &BundleConfig,
        file: FileId,
    ) -> Result<(), BundleError> {
        if self.nodes.contains_key(&file) {
            return Ok(());
        }

        let deps = self.register(catalog, config, file, None)?;
        let mut stack = vec![Frame {
            file,
            deps,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.deps.len() {
                let finished = frame.file;
                if let Some(node) = self.nodes.get_mut(&finished) {
                    node.resolved = true;
                }
                stack.pop();
                continue;
            }

            let parent = frame.file;
            let dep = frame.deps[frame.next];
            frame.next += 1;

            if let Some(node) = self.nodes.get_mut(&dep) {
                node.dependents.push(parent);
                continue;
            }

            let dep_deps = self.register(catalog, config, dep, Some(parent))?;
            if let Some(node) = self.nodes.get_mut(&dep) {
                node.dependents.push(parent);
            }
            stack.push(Frame {
                file: dep,
                deps: dep_deps,
                next: 0,
            });
        }

        Ok(())
    }

    /// Reads a file, extracts its include targets, and pre-registers its
    /// node with an empty dependent list and `resolved = false`.
    fn register(
        &mut self,
        catalog: &mut FileCatalog,
        config: &BundleConfig,
        file: FileId,
        referenced_by: Option<FileId>,
    ) -> Result<Vec<FileId>, BundleError> {
        let path = catalog.get(file).path.clone();
        let bytes = fs::read(&path).map_err(|source| match referenced_by {
            Some(parent) => BundleError::UnreadableDependency {
                target: display_path(&catalog.get(file).relative),
                referenced_by: display_path(&catalog.get(parent).relative),
                source,
            },
            None => BundleError::UnreadableSource {
                path: display_path(&catalog.get(file).relative),
                source,
            },
        })?;
        let text = String::from_utf8_lossy(&bytes);

        let deps: Vec<FileId> = extract_includes(&text, config)
            .iter()
            .map(|target| catalog.intern(&target.path))
            .collect();

        self.nodes.insert(
            file,
            GraphNode {
                file,
                dependencies: deps.clone(),
                dependents: Vec::new(),
                resolved: false,
            },
        );
        Ok(deps)
    }
}
