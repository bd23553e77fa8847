//! Graph Nodes
//!
//! This module defines the node type that lives in the dependency graph and
//! the borrowed view used to query it.

use std::collections::HashSet;
use std::fmt;

use smallvec::SmallVec;

use super::dag::Graph;
use super::edge::{Edge, EdgeId};
use super::error::Role;
use super::refs::NodeRef;

/// Edge handles incident to a node. Most nodes touch only a few edges.
pub(crate) type EdgeList = SmallVec<[EdgeId; 4]>;

/// Handle to a node in the dependency graph.
///
/// Handles are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Get the arena slot of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// A named vertex in the dependency graph.
///
/// A node never owns its edges; it only records the handles of the edges
/// that touch it. Every handle in `input_edges` or `output_edges` is also in
/// `edges`, and no handle is in both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique key within the graph.
    name: String,

    /// Every edge touching this node, in link order.
    edges: EdgeList,

    /// Edges whose output is this node (its dependencies point in here).
    input_edges: EdgeList,

    /// Edges whose input is this node (its dependents hang off here).
    output_edges: EdgeList,
}

impl Node {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            edges: EdgeList::new(),
            input_edges: EdgeList::new(),
            output_edges: EdgeList::new(),
        }
    }

    /// Get the node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all edges touching this node.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Get the edges pointing into this node.
    pub fn input_edges(&self) -> &[EdgeId] {
        &self.input_edges
    }

    /// Get the edges pointing out of this node.
    pub fn output_edges(&self) -> &[EdgeId] {
        &self.output_edges
    }

    /// Register an edge that starts at this node.
    pub(crate) fn attach_output(&mut self, edge: EdgeId) {
        self.output_edges.push(edge);
        self.edges.push(edge);
    }

    /// Register an edge that ends at this node.
    pub(crate) fn attach_input(&mut self, edge: EdgeId) {
        self.input_edges.push(edge);
        self.edges.push(edge);
    }

    pub(crate) fn detach_output(&mut self, edge: EdgeId) {
        self.output_edges.retain(|e| *e != edge);
        self.edges.retain(|e| *e != edge);
    }

    pub(crate) fn detach_input(&mut self, edge: EdgeId) {
        self.input_edges.retain(|e| *e != edge);
        self.edges.retain(|e| *e != edge);
    }
}

/// A read-only view of one node together with the graph it belongs to.
///
/// Queries that need to look past the node's own edge lists (neighbour
/// names, reduction) live here.
#[derive(Clone, Copy)]
pub struct NodeHandle<'g> {
    graph: &'g Graph,
    id: NodeId,
    node: &'g Node,
}

impl<'g> NodeHandle<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId, node: &'g Node) -> Self {
        Self { graph, id, node }
    }

    /// Get the node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's name.
    pub fn name(&self) -> &'g str {
        self.node.name()
    }

    /// Get the underlying node.
    pub fn node(&self) -> &'g Node {
        self.node
    }

    /// Get all edges touching this node.
    pub fn edges(&self) -> &'g [EdgeId] {
        self.node.edges()
    }

    /// Get the edges pointing into this node.
    pub fn input_edges(&self) -> &'g [EdgeId] {
        self.node.input_edges()
    }

    /// Get the edges pointing out of this node.
    pub fn output_edges(&self) -> &'g [EdgeId] {
        self.node.output_edges()
    }

    /// Nodes this node directly depends on, one per input edge.
    pub fn input_nodes(&self) -> impl Iterator<Item = NodeId> + 'g {
        let graph = self.graph;
        self.node
            .input_edges()
            .iter()
            .filter_map(move |&edge| graph.edge(edge).and_then(Edge::input_node))
    }

    /// Nodes that directly depend on this node, one per output edge.
    pub fn output_nodes(&self) -> impl Iterator<Item = NodeId> + 'g {
        let graph = self.graph;
        self.node
            .output_edges()
            .iter()
            .filter_map(move |&edge| graph.edge(edge).and_then(Edge::output_node))
    }

    /// Find the input edge coming from `from`.
    ///
    /// Matches on the name of the edge's input node. Returns `None` for an
    /// empty name, a handle this graph does not know, or when no input edge
    /// matches. The first match wins.
    pub fn edge_from<'a>(&self, from: impl Into<NodeRef<'a>>) -> Option<EdgeId> {
        let name = self.ref_name(from.into())?;
        self.find_edge(self.node.input_edges(), Role::Input, name)
    }

    /// Find the output edge going to `to`.
    ///
    /// Same matching rules as [`edge_from`](Self::edge_from), applied to the
    /// output node of each output edge.
    pub fn edge_to<'a>(&self, to: impl Into<NodeRef<'a>>) -> Option<EdgeId> {
        let name = self.ref_name(to.into())?;
        self.find_edge(self.node.output_edges(), Role::Output, name)
    }

    /// Get the input edges that are not shortcuts for a closer dependency.
    ///
    /// An input edge `N -> self` is dropped when `N` is itself a direct
    /// input of one of this node's direct inputs. The lookahead is a single
    /// hop: a shortcut over a longer chain is kept. Edges are returned in
    /// the order of [`input_edges`](Self::input_edges).
    pub fn optimized_input_edges(&self) -> Vec<EdgeId> {
        let mut redundant: HashSet<EdgeId> = HashSet::new();

        for parent in self.input_nodes() {
            let Some(parent) = self.graph.node(parent) else {
                continue;
            };

            for grandparent in parent.input_nodes() {
                let shortcut = self
                    .graph
                    .node(grandparent)
                    .and_then(|grandparent| grandparent.edge_to(self.name()));
                if let Some(edge) = shortcut {
                    redundant.insert(edge);
                }
            }
        }

        self.node
            .input_edges()
            .iter()
            .copied()
            .filter(|edge| !redundant.contains(edge))
            .collect()
    }

    fn ref_name<'s>(&'s self, node: NodeRef<'s>) -> Option<&'s str> {
        match node {
            NodeRef::Name(name) if name.is_empty() => None,
            NodeRef::Name(name) => Some(name),
            NodeRef::Id(id) => self.graph.node(id).map(|handle| handle.name()),
        }
    }

    fn find_edge(&self, edges: &[EdgeId], role: Role, name: &str) -> Option<EdgeId> {
        edges
            .iter()
            .copied()
            .find(|&edge| self.graph.endpoint_name(edge, role) == Some(name))
    }
}

impl fmt::Debug for NodeHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("id", &self.id)
            .field("name", &self.node.name())
            .finish()
    }
}
