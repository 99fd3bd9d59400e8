//! Node (vertex) types for the graph data model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node type classification
///
/// An open label set: callers bring their own taxonomy ("module",
/// "document", "service"). The engine compares labels for equality and
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeType(pub String);

impl NodeType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for NodeType {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the graph under analysis
///
/// Nodes are plain value records. The engine reads them and never mutates
/// them; property values are opaque scalars carried through to reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within the graph being analyzed
    pub id: String,

    /// Node type/category
    pub node_type: NodeType,

    /// Arbitrary scalar properties
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Node {
    /// Create a new node
    pub fn new(id: impl Into<String>, node_type: impl Into<NodeType>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            properties: HashMap::new(),
        }
    }

    /// Attach a property to this node
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
