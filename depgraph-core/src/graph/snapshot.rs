//! Graph Snapshots
//!
//! A snapshot is a serializable picture of the named nodes and who they
//! link to. It is meant for debugging and test fixtures, not as a stable
//! storage format.

use serde::{Deserialize, Serialize};

use super::dag::Graph;
use super::error::GraphError;
use crate::config::GraphOptions;

/// One named node and the names of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,

    /// Names of the nodes this node depends on, in input-edge order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,

    /// Names of the nodes that depend on this node, in output-edge order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,
}

/// The named nodes of a graph in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl GraphSnapshot {
    /// Take a snapshot of `graph`.
    pub fn capture(graph: &Graph) -> Self {
        let name_of = |id| graph.node(id).map(|node| node.name().to_owned());

        let nodes = graph
            .nodes()
            .map(|node| NodeSnapshot {
                name: node.name().to_owned(),
                inputs: node.input_nodes().filter_map(name_of).collect(),
                outputs: node.output_nodes().filter_map(name_of).collect(),
            })
            .collect();

        Self { nodes }
    }

    /// Rebuild a graph from the snapshot.
    ///
    /// All nodes are created first, then each node's inputs are linked into
    /// it. `outputs` is not consulted; it mirrors `inputs` of other nodes.
    pub fn restore(&self, options: GraphOptions) -> Result<Graph, GraphError> {
        let mut graph = Graph::with_options(options);
        graph.create_nodes(self.nodes.iter().map(|node| node.name.as_str()));

        for node in &self.nodes {
            if !node.inputs.is_empty() {
                graph.link(node.inputs.as_slice(), node.name.as_str())?;
            }
        }

        Ok(graph)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
