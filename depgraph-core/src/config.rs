//! Graph Options
//!
//! Options are plain data. They can be built in code or loaded from JSON,
//! where every field is optional:
//!
//! ```json
//! { "link_mode": "incremental" }
//! ```

use serde::{Deserialize, Serialize};

/// How [`Graph::link`](crate::Graph::link) behaves when one pair of a
/// multi-node link would close a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Check every pair before creating any edge. A rejected call changes
    /// nothing.
    #[default]
    Atomic,

    /// Check and create one pair at a time. Edges created before the
    /// rejected pair are kept.
    Incremental,
}

/// Options for a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Failure behavior of multi-node links.
    pub link_mode: LinkMode,
}

impl GraphOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize options to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
