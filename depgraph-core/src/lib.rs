//! Depgraph Core
//!
//! This crate provides the dependency graph used to order dashboard scene
//! objects and resolve variable dependencies. It implements:
//!
//! - Named nodes and directed edges stored in arenas
//! - Cycle rejection when linking nodes
//! - Descendant traversal over input edges
//! - One-hop reduction of a node's input edges
//!
//! The graph is a plain in-memory data structure. It does no I/O and never
//! blocks; wrap it in a [`SharedGraph`] when several threads need it.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Nodes, edges, the graph itself and its debug snapshot
//! - `config`: Options that tune how the graph links nodes
//! - `sync`: A lock-protected handle for sharing one graph across threads
//!
//! # Example
//!
//! ```rust
//! use depgraph_core::Graph;
//!
//! let mut graph = Graph::new();
//! graph.create_nodes(["query", "panel", "dashboard"]);
//!
//! // "query" feeds "panel", which feeds "dashboard".
//! graph.link("query", "panel").unwrap();
//! graph.link("panel", "dashboard").unwrap();
//!
//! // Closing the loop is rejected.
//! assert!(graph.link("dashboard", "query").is_err());
//!
//! let dashboard = graph.node_id("dashboard").unwrap();
//! assert_eq!(graph.descendants(dashboard).unwrap().len(), 2);
//! ```

pub mod config;
pub mod graph;
pub mod sync;

pub use config::{GraphOptions, LinkMode};
pub use graph::{
    Edge, EdgeId, Graph, GraphError, GraphSnapshot, Node, NodeHandle, NodeId, NodeRef, NodeRefs,
    NodeSnapshot, Role,
};
pub use sync::SharedGraph;
