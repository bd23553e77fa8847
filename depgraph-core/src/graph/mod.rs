//! Dependency Graph
//!
//! This module implements the directed acyclic graph that tracks which
//! scene objects and variables depend on which.
//!
//! # Overview
//!
//! - Nodes are named vertices. A name is unique within a graph.
//! - Edges run from an input node to an output node: if A depends on B, the
//!   edge linking them has B as its input and A as its output.
//!
//! Every edge is registered with both of its endpoints. From the input
//! node's point of view it is an output edge; from the output node's point
//! of view it is an input edge.
//!
//! # Design Decisions
//!
//! 1. Nodes and edges live in arenas owned by [`Graph`] and refer to each
//!    other through [`NodeId`] and [`EdgeId`] handles. A node and its edges
//!    point at each other, so references would form ownership cycles.
//!
//! 2. Edges are only created through [`Graph::link`], which rejects any link
//!    that would close a cycle. The whole edge set stays acyclic.
//!
//! 3. Arguments that may name a node or hand over its handle are modelled
//!    with [`NodeRef`], and "one or many" arguments with [`NodeRefs`].

mod dag;
mod edge;
mod error;
mod node;
mod refs;
mod snapshot;

pub use dag::Graph;
pub use edge::{Edge, EdgeId};
pub use error::{GraphError, Role};
pub use node::{Node, NodeHandle, NodeId};
pub use refs::{NodeRef, NodeRefs};
pub use snapshot::{GraphSnapshot, NodeSnapshot};
