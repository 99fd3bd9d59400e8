//! Edge types and traversal direction

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Edge type classification
///
/// Open label set, like [`crate::node::NodeType`]: compared by equality,
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeType(pub String);

impl EdgeType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EdgeType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for EdgeType {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction for graph traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
    #[default]
    Both,
}

/// A directed edge between two nodes
///
/// `from` and `to` are node ids. They are not required to resolve to nodes
/// present in a snapshot: dangling ids are counted for degrees but never
/// materialized as nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub from: String,

    /// Target node id
    pub to: String,

    /// Type of relationship (e.g., "depends_on", "references")
    pub edge_type: EdgeType,

    /// Arbitrary scalar properties
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type: edge_type.into(),
            properties: HashMap::new(),
        }
    }

    /// Attach a property to this edge
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Whether this edge starts and ends at the same node
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
