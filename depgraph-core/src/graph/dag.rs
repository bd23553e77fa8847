//! Graph
//!
//! The graph owns every node and edge, mediates all edge creation and keeps
//! the edge set acyclic.
//!
//! # Linking
//!
//! [`Graph::link`] connects every input to every output (a Cartesian
//! product). All names are resolved before any edge exists, so an unknown
//! name never leaves a half-built link behind. Each pair is then checked
//! for cycles: the pair `input -> output` closes a cycle when it is a
//! self-loop or when `input` is already reachable from `output` by
//! following output edges.
//!
//! In [`LinkMode::Atomic`] (the default) every pair is checked before the
//! first edge is created, so a rejected call leaves the graph untouched.
//! [`LinkMode::Incremental`] checks and creates pair by pair; edges created
//! before the rejected pair stay in the graph.
//!
//! # Traversal
//!
//! [`Graph::descendants`] walks input edges from a starting set and returns
//! every node the set transitively depends on.

use std::collections::HashSet;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use super::edge::{Edge, EdgeId};
use super::error::{GraphError, Role};
use super::node::{Node, NodeHandle, NodeId};
use super::refs::{NodeRef, NodeRefs};
use crate::config::{GraphOptions, LinkMode};

/// A directed acyclic graph of named nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Node arena. A node replaced by `create_node` stays here.
    pub(super) nodes: Vec<Node>,

    /// Edge arena, including unlinked edges.
    pub(super) edges: Vec<Edge>,

    /// Name index in creation order.
    names: IndexMap<String, NodeId>,

    options: GraphOptions,
}

impl Graph {
    /// Create a new empty graph with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph with the given options.
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Get the options this graph was built with.
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Create a node and register it under `name`.
    ///
    /// An existing node with the same name is replaced in the name index.
    /// The replaced node keeps its edges and stays reachable through them.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let name = name.into();
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(name.clone()));

        if let Some(previous) = self.names.insert(name, id) {
            tracing::debug!(
                name = self.nodes[id.index()].name(),
                %previous,
                "replaced existing node"
            );
        }
        id
    }

    /// Create one node per name, returning their handles in the same order.
    pub fn create_nodes<I, S>(&mut self, names: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(|name| self.create_node(name)).collect()
    }

    /// Create a fresh, unlinked edge.
    pub fn create_edge(&mut self) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(Edge::default());
        id
    }

    /// Look up a node by name.
    pub fn get_node(&self, name: &str) -> Option<NodeHandle<'_>> {
        self.node(self.node_id(name)?)
    }

    /// Get the handle registered under `name`.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Get a view of the node behind `id`.
    pub fn node(&self, id: NodeId) -> Option<NodeHandle<'_>> {
        self.nodes
            .get(id.index())
            .map(|node| NodeHandle::new(self, id, node))
    }

    /// Get the edge behind `id`.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Iterate over the named nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeHandle<'_>> + '_ {
        self.names.values().filter_map(|&id| self.node(id))
    }

    /// Number of named nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of edges that currently connect two nodes.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_linked()).count()
    }

    /// Link every node in `input` to every node in `output`.
    ///
    /// Returns the created edges ordered by input, then by output. Fails
    /// with [`GraphError::NodeNotFound`] before creating anything if a name
    /// does not resolve, and with [`GraphError::CycleDetected`] if a pair
    /// would close a cycle. See the module docs for how much of a rejected
    /// call survives in each [`LinkMode`].
    pub fn link<'a>(
        &mut self,
        input: impl Into<NodeRefs<'a>>,
        output: impl Into<NodeRefs<'a>>,
    ) -> Result<Vec<EdgeId>, GraphError> {
        let inputs = self.resolve(input.into(), Role::Input)?;
        let outputs = self.resolve(output.into(), Role::Output)?;

        let pairs: Vec<(NodeId, NodeId)> = inputs
            .iter()
            .flat_map(|&input| outputs.iter().map(move |&output| (input, output)))
            .collect();

        let mode = self.options.link_mode;
        let created = match mode {
            LinkMode::Atomic => {
                for &(input, output) in &pairs {
                    self.ensure_acyclic(input, output)?;
                }
                pairs
                    .into_iter()
                    .map(|(input, output)| self.connect(input, output))
                    .collect::<Vec<_>>()
            }
            LinkMode::Incremental => {
                let mut created = Vec::with_capacity(pairs.len());
                for (input, output) in pairs {
                    self.ensure_acyclic(input, output)?;
                    created.push(self.connect(input, output));
                }
                created
            }
        };

        tracing::trace!(edges = created.len(), "linked nodes");
        Ok(created)
    }

    /// Check whether an edge `input -> output` would close a cycle.
    ///
    /// True for a self-loop, or when `input` is reachable from `output` by
    /// following output edges.
    pub fn will_create_cycle(&self, input: NodeId, output: NodeId) -> bool {
        if input == output {
            return true;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![output];

        while let Some(current) = stack.pop() {
            if current == input {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(node) = self.node(current) {
                stack.extend(node.output_nodes().filter(|next| !visited.contains(next)));
            }
        }

        false
    }

    /// Collect every node the given nodes transitively depend on.
    ///
    /// Follows input edges breadth-first. The starting nodes themselves are
    /// not part of the result. Names that no node carries are skipped; a
    /// handle from another graph fails with [`GraphError::UnknownNode`].
    pub fn descendants<'a>(
        &self,
        nodes: impl Into<NodeRefs<'a>>,
    ) -> Result<IndexSet<NodeId>, GraphError> {
        let nodes = nodes.into();
        let mut found = IndexSet::new();
        if nodes.is_empty() {
            return Ok(found);
        }

        let mut frontier = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                NodeRef::Name(name) => match self.node_id(name) {
                    Some(id) => frontier.push(id),
                    None => tracing::debug!(name, "skipping unknown node in descendants"),
                },
                NodeRef::Id(id) => {
                    self.check_node(id)?;
                    frontier.push(id);
                }
            }
        }

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for id in frontier {
                let Some(node) = self.node(id) else {
                    continue;
                };
                for parent in node.input_nodes() {
                    if found.insert(parent) {
                        next.push(parent);
                    }
                }
            }
            frontier = next;
        }

        Ok(found)
    }

    /// Log each named node with its neighbours at debug level.
    pub fn print_graph(&self) {
        for node in self.nodes() {
            tracing::debug!(
                node = node.name(),
                links_to = %self.neighbour_list(node.output_nodes()),
                links_from = %self.neighbour_list(node.input_nodes()),
                "graph node"
            );
        }
    }

    /// Name of the node at one end of `edge`.
    pub(crate) fn endpoint_name(&self, edge: EdgeId, role: Role) -> Option<&str> {
        let edge = self.edge(edge)?;
        let id = match role {
            Role::Input => edge.input_node()?,
            Role::Output => edge.output_node()?,
        };
        self.nodes.get(id.index()).map(Node::name)
    }

    pub(super) fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }

    pub(super) fn check_edge(&self, id: EdgeId) -> Result<(), GraphError> {
        if id.index() < self.edges.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownEdge(id))
        }
    }

    fn resolve(&self, nodes: NodeRefs<'_>, role: Role) -> Result<SmallVec<[NodeId; 4]>, GraphError> {
        nodes
            .into_iter()
            .map(|node| match node {
                NodeRef::Name(name) => {
                    self.node_id(name).ok_or_else(|| GraphError::NodeNotFound {
                        role,
                        name: name.to_owned(),
                    })
                }
                NodeRef::Id(id) => self.check_node(id).map(|()| id),
            })
            .collect()
    }

    fn ensure_acyclic(&self, input: NodeId, output: NodeId) -> Result<(), GraphError> {
        if !self.will_create_cycle(input, output) {
            return Ok(());
        }

        let input = self.nodes[input.index()].name().to_owned();
        let output = self.nodes[output.index()].name().to_owned();
        tracing::debug!(%input, %output, "rejected link that would create a cycle");
        Err(GraphError::CycleDetected { input, output })
    }

    fn connect(&mut self, input: NodeId, output: NodeId) -> EdgeId {
        let edge = self.create_edge();
        self.attach(edge, input, output);
        edge
    }

    fn neighbour_list(&self, ids: impl Iterator<Item = NodeId>) -> String {
        let names: Vec<&str> = ids
            .filter_map(|id| self.nodes.get(id.index()).map(Node::name))
            .collect();
        if names.is_empty() {
            "<none>".to_owned()
        } else {
            names.join(", ")
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes() {
            writeln!(f, "{}:", node.name())?;
            writeln!(f, " - links to:   {}", self.neighbour_list(node.output_nodes()))?;
            writeln!(f, " - links from: {}", self.neighbour_list(node.input_nodes()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_lookup_nodes() {
        let mut graph = Graph::new();
        let ids = graph.create_nodes(["A", "B", "C"]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node_id("B"), Some(ids[1]));
        assert_eq!(graph.get_node("C").unwrap().id(), ids[2]);
        assert!(graph.get_node("D").is_none());

        let names: Vec<_> = graph.nodes().map(|node| node.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn create_node_replaces_silently() {
        let mut graph = Graph::new();
        let first = graph.create_node("A");
        let b = graph.create_node("B");
        graph.link(first, b).unwrap();

        let second = graph.create_node("A");

        assert_ne!(first, second);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node_id("A"), Some(second));
        assert!(graph.node(second).unwrap().edges().is_empty());
        // The old node still feeds B.
        assert_eq!(graph.node(first).unwrap().output_edges().len(), 1);
    }

    #[test]
    fn link_creates_cartesian_product() {
        let mut graph = Graph::new();
        let ids = graph.create_nodes(["i1", "i2", "i3", "o1", "o2"]);

        let edges = graph.link(["i1", "i2", "i3"], ["o1", "o2"]).unwrap();

        assert_eq!(edges.len(), 6);
        assert_eq!(graph.edge_count(), 6);
        let pairs: Vec<_> = edges
            .iter()
            .map(|&edge| graph.edge(edge).unwrap().endpoints().unwrap())
            .collect();
        assert_eq!(
            pairs,
            vec![
                (ids[0], ids[3]),
                (ids[0], ids[4]),
                (ids[1], ids[3]),
                (ids[1], ids[4]),
                (ids[2], ids[3]),
                (ids[2], ids[4]),
            ]
        );
    }

    #[test]
    fn link_accepts_mixed_references() {
        let mut graph = Graph::new();
        let ids = graph.create_nodes(["A", "B", "C"]);

        let edges = graph
            .link(vec![NodeRef::from("A"), NodeRef::from(ids[1])], ids[2])
            .unwrap();

        assert_eq!(edges.len(), 2);
        assert_eq!(graph.node(ids[2]).unwrap().input_edges(), edges.as_slice());
    }

    #[test]
    fn link_reports_missing_names_before_creating_edges() {
        let mut graph = Graph::new();
        graph.create_nodes(["A", "B"]);

        let err = graph.link(["A", "missing"], "B").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot link input node named missing since it doesn't exist in graph"
        );

        let err = graph.link("A", ["B", "missing"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot link output node named missing since it doesn't exist in graph"
        );

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_loops_are_rejected() {
        let mut graph = Graph::new();
        graph.create_node("A");

        let err = graph.link("A", "A").unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                input: "A".to_owned(),
                output: "A".to_owned(),
            }
        );
    }

    #[test]
    fn closing_edge_is_rejected() {
        let mut graph = Graph::new();
        graph.create_nodes(["A", "B", "C"]);
        graph.link("A", "B").unwrap();
        graph.link("B", "C").unwrap();

        let err = graph.link("C", "A").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot link C to A since it would create a cycle"
        );
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn atomic_link_leaves_graph_untouched() {
        let mut graph = Graph::new();
        graph.create_nodes(["A", "B", "C"]);
        graph.link("A", "B").unwrap();

        // A -> C is fine, B -> A is not.
        assert!(graph.link(["A", "B"], ["C", "A"]).is_err());
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.get_node("C").unwrap().edges().is_empty());
    }

    #[test]
    fn incremental_link_keeps_earlier_edges() {
        let mut graph = Graph::with_options(GraphOptions {
            link_mode: LinkMode::Incremental,
        });
        graph.create_nodes(["A", "B", "C"]);
        graph.link("A", "B").unwrap();

        // A -> C is created before A -> A is rejected.
        let err = graph.link("A", ["C", "A"]).unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.get_node("C").unwrap().input_edges().len(), 1);
    }

    #[test]
    fn will_create_cycle_follows_output_edges() {
        let mut graph = Graph::new();
        let ids = graph.create_nodes(["A", "B", "C", "D"]);
        graph.link("A", "B").unwrap();
        graph.link("B", "C").unwrap();

        assert!(graph.will_create_cycle(ids[2], ids[0]));
        assert!(graph.will_create_cycle(ids[1], ids[1]));
        assert!(!graph.will_create_cycle(ids[0], ids[2]));
        assert!(!graph.will_create_cycle(ids[3], ids[0]));
    }

    #[test]
    fn descendants_follow_input_edges() {
        let mut graph = Graph::new();
        let ids = graph.create_nodes(["A", "B", "C", "D"]);
        graph.link("C", "B").unwrap();
        graph.link("B", "A").unwrap();

        let found = graph.descendants("A").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&ids[1]));
        assert!(found.contains(&ids[2]));

        assert!(graph.descendants("C").unwrap().is_empty());
        assert!(graph.descendants(Vec::<NodeId>::new()).unwrap().is_empty());
        assert!(graph.descendants("nope").unwrap().is_empty());
    }

    #[test]
    fn descendants_skip_unknown_names() {
        let mut graph = Graph::new();
        graph.create_nodes(["A", "B", "C"]);
        graph.link("C", "B").unwrap();
        graph.link("B", "A").unwrap();

        let with_missing = graph.descendants(["A", "missing"]).unwrap();
        assert_eq!(with_missing, graph.descendants("A").unwrap());
        assert_eq!(with_missing.len(), 2);

        let ids = [graph.node_id("A").unwrap(), NodeId::from_index(99)];
        assert_eq!(
            graph.descendants(ids),
            Err(GraphError::UnknownNode(NodeId::from_index(99)))
        );
    }

    #[test]
    fn descendants_visit_shared_parents_once() {
        let mut graph = Graph::new();
        graph.create_nodes(["A", "B", "C", "D"]);
        graph.link("D", ["B", "C"]).unwrap();
        graph.link(["B", "C"], "A").unwrap();

        let found = graph.descendants(["A", "B"]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|&id| graph.node(id).unwrap().name())
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"B"));
        assert!(names.contains(&"C"));
        assert!(names.contains(&"D"));
    }

    #[test]
    fn display_lists_neighbours() {
        let mut graph = Graph::new();
        graph.create_nodes(["A", "B"]);
        graph.link("A", "B").unwrap();

        let rendered = graph.to_string();
        assert_eq!(
            rendered,
            "A:\n - links to:   B\n - links from: <none>\nB:\n - links to:   <none>\n - links from: A\n"
        );

        // Logging goes through tracing and needs no subscriber.
        graph.print_graph();
    }
}
