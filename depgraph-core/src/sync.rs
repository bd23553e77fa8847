//! Shared Graphs
//!
//! [`Graph`] itself has no interior locking: every mutation takes
//! `&mut self`. When several threads need the same graph, [`SharedGraph`]
//! serializes them behind a single read-write lock. Readers run in
//! parallel; a writer excludes everyone else for the duration of one
//! closure.

use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;

use crate::graph::{EdgeId, Graph, GraphError, GraphSnapshot, NodeId, NodeRefs};

/// A cloneable, lock-protected handle to one [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    /// Wrap an existing graph.
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Run `f` with shared access to the graph.
    pub fn read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the graph.
    pub fn write<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Create a node under the write lock.
    pub fn create_node(&self, name: impl Into<String>) -> NodeId {
        self.write(|graph| graph.create_node(name))
    }

    /// Link nodes under the write lock. See [`Graph::link`].
    pub fn link<'a>(
        &self,
        input: impl Into<NodeRefs<'a>>,
        output: impl Into<NodeRefs<'a>>,
    ) -> Result<Vec<EdgeId>, GraphError> {
        self.write(|graph| graph.link(input, output))
    }

    /// Collect descendants under the read lock. See [`Graph::descendants`].
    pub fn descendants<'a>(
        &self,
        nodes: impl Into<NodeRefs<'a>>,
    ) -> Result<IndexSet<NodeId>, GraphError> {
        self.read(|graph| graph.descendants(nodes))
    }

    /// Take a snapshot under the read lock.
    pub fn snapshot(&self) -> GraphSnapshot {
        self.read(GraphSnapshot::capture)
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}
