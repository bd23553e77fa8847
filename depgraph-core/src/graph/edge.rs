//! Graph Edges
//!
//! An edge is a directed arc from an input node (the dependency) to an
//! output node (the dependent). Edges are mutable: the same edge can be
//! unlinked and linked again to a different pair of nodes.

use std::fmt;

use super::dag::Graph;
use super::error::{GraphError, Role};
use super::node::NodeId;

/// Handle to an edge in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Get the arena slot of this edge.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge #{}", self.0)
    }
}

/// A directed connection between two nodes.
///
/// A linked edge has both endpoints set and is registered with both of
/// them. An unlinked edge has neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edge {
    input: Option<NodeId>,
    output: Option<NodeId>,
}

impl Edge {
    /// The upstream end of the edge, if linked.
    pub fn input_node(&self) -> Option<NodeId> {
        self.input
    }

    /// The downstream end of the edge, if linked.
    pub fn output_node(&self) -> Option<NodeId> {
        self.output
    }

    /// Both ends of the edge, if linked.
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        Some((self.input?, self.output?))
    }

    /// Check whether the edge currently connects two nodes.
    pub fn is_linked(&self) -> bool {
        self.endpoints().is_some()
    }
}

impl Graph {
    /// Link `edge` so that it runs from `input` to `output`.
    ///
    /// The edge is unlinked from whatever it connected before, so linking
    /// the same pair twice registers it only once. No cycle check happens
    /// here; [`Graph::link`] is the checked entry point.
    pub fn link_edge(
        &mut self,
        edge: EdgeId,
        input: Option<NodeId>,
        output: Option<NodeId>,
    ) -> Result<EdgeId, GraphError> {
        let input = input.ok_or(GraphError::InvalidArgument(Role::Input))?;
        let output = output.ok_or(GraphError::InvalidArgument(Role::Output))?;
        self.check_edge(edge)?;
        self.check_node(input)?;
        self.check_node(output)?;

        self.detach(edge);
        self.attach(edge, input, output);
        Ok(edge)
    }

    /// Remove `edge` from both of its endpoints and clear them.
    ///
    /// Unlinking an edge that is not linked does nothing.
    pub fn unlink_edge(&mut self, edge: EdgeId) -> Result<(), GraphError> {
        self.check_edge(edge)?;
        self.detach(edge);
        Ok(())
    }

    /// Wire an edge to two nodes. All three handles must be valid.
    pub(super) fn attach(&mut self, edge: EdgeId, input: NodeId, output: NodeId) {
        self.edges[edge.index()] = Edge {
            input: Some(input),
            output: Some(output),
        };
        self.nodes[input.index()].attach_output(edge);
        self.nodes[output.index()].attach_input(edge);
    }

    pub(super) fn detach(&mut self, edge: EdgeId) {
        let Some((input, output)) = self.edges[edge.index()].endpoints() else {
            return;
        };
        self.nodes[input.index()].detach_output(edge);
        self.nodes[output.index()].detach_input(edge);
        self.edges[edge.index()] = Edge::default();
    }
}
