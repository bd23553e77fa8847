//! Graph errors.

use std::fmt;

use thiserror::Error;

use super::edge::EdgeId;
use super::node::NodeId;

/// Which end of an edge an argument was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The upstream end: the dependency.
    Input,
    /// The downstream end: the dependent.
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Input => f.write_str("input"),
            Role::Output => f.write_str("output"),
        }
    }
}

/// Errors that can occur while building or querying a [`Graph`](super::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge was linked without one of its endpoints.
    #[error("{0}Node is required")]
    InvalidArgument(Role),

    /// `link` was given a name that no node in the graph carries.
    #[error("cannot link {role} node named {name} since it doesn't exist in graph")]
    NodeNotFound { role: Role, name: String },

    /// `link` was asked for an edge that would close a cycle.
    #[error("cannot link {input} to {output} since it would create a cycle")]
    CycleDetected { input: String, output: String },

    /// A node handle that was not issued by this graph.
    #[error("{0} does not belong to this graph")]
    UnknownNode(NodeId),

    /// An edge handle that was not issued by this graph.
    #[error("{0} does not belong to this graph")]
    UnknownEdge(EdgeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_side() {
        assert_eq!(
            GraphError::InvalidArgument(Role::Input).to_string(),
            "inputNode is required"
        );
        assert_eq!(
            GraphError::InvalidArgument(Role::Output).to_string(),
            "outputNode is required"
        );

        let err = GraphError::NodeNotFound {
            role: Role::Output,
            name: "missing".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "cannot link output node named missing since it doesn't exist in graph"
        );
    }

    #[test]
    fn cycle_message() {
        let err = GraphError::CycleDetected {
            input: "A".to_owned(),
            output: "B".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "cannot link A to B since it would create a cycle"
        );
    }
}
