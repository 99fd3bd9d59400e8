//! Detected pattern types and the detector contract

use crate::config::DetectionConfig;
use crate::edge::Edge;
use crate::node::Node;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a detected pattern
///
/// The variant order is load-bearing: `Info < Warning < Error < Critical`,
/// and the report-level severity filter compares with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no action expected
    #[default]
    Info,
    /// Worth a look
    Warning,
    /// Likely a real problem
    Error,
    /// Structural problem that will bite
    Critical,
}

/// Kinds of structural patterns the detectors report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// A dependency loop among two or more nodes (or a self-loop)
    CircularDependency,
    /// A node disconnected from the rest of the graph
    OrphanedNode,
    /// A node with outlier connectivity
    HubNode,
}

impl PatternKind {
    /// All known kinds, in the order the scanner runs them
    pub fn all() -> [PatternKind; 3] {
        [
            PatternKind::CircularDependency,
            PatternKind::OrphanedNode,
            PatternKind::HubNode,
        ]
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CircularDependency => "circular_dependency",
            Self::OrphanedNode => "orphaned_node",
            Self::HubNode => "hub_node",
        };
        write!(f, "{}", s)
    }
}

/// Effort estimate for a remediation suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

/// A suggested remediation for a detected pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remediation {
    /// Short machine-friendly action tag (e.g., "remove_dead_code")
    pub action: String,

    /// Human-readable summary of the suggestion
    pub description: String,

    /// Ordered steps to carry the suggestion out
    #[serde(default)]
    pub steps: Vec<String>,

    /// Rank among this finding's suggestions (1 = try first)
    pub priority: u8,

    /// Rough effort estimate
    pub effort: Effort,
}

impl Remediation {
    /// Create a new remediation suggestion
    pub fn new(
        action: impl Into<String>,
        description: impl Into<String>,
        priority: u8,
        effort: Effort,
    ) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            steps: Vec::new(),
            priority,
            effort,
        }
    }

    /// Append a step to this suggestion
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }
}

/// A structural pattern found during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPattern {
    /// What kind of pattern this is
    pub kind: PatternKind,

    /// How serious the finding is
    pub severity: Severity,

    /// Human-readable description of the finding
    pub description: String,

    /// Ids of the nodes implicated in the pattern
    #[serde(default)]
    pub node_ids: Vec<String>,

    /// Ranked remediation suggestions (may be empty)
    #[serde(default)]
    pub suggestions: Vec<Remediation>,

    /// When the detector produced this finding
    pub detected_at: DateTime<Utc>,
}

impl DetectedPattern {
    /// Create a new finding
    pub fn new(kind: PatternKind, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            node_ids: Vec::new(),
            suggestions: Vec::new(),
            detected_at: Utc::now(),
        }
    }

    /// Add an implicated node id
    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.node_ids.push(id.into());
        self
    }

    /// Add several implicated node ids
    pub fn with_nodes(mut self, ids: Vec<String>) -> Self {
        self.node_ids.extend(ids);
        self
    }

    /// Add a remediation suggestion
    pub fn with_suggestion(mut self, suggestion: Remediation) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Findings from a single detector pass
///
/// Detectors that enumerate under a cap set `truncated` instead of
/// dropping findings silently, so a capped pass is never mistaken for an
/// exhaustive one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    /// The findings, in discovery order
    #[serde(default)]
    pub patterns: Vec<DetectedPattern>,

    /// Whether a reporting cap cut this pass short
    #[serde(default)]
    pub truncated: bool,
}

/// Contract implemented by each pattern detector
///
/// Detectors are stateless peers: each one reads the same node and edge
/// slices, applies the shared [`DetectionConfig`], and returns its own
/// findings without looking at any other detector's output. Structurally
/// odd input (dangling edge endpoints, self-loops, duplicate edges) must
/// produce findings or silence, never a panic. Truncation is reported on
/// the [`DetectionResult`], not as a synthetic finding.
pub trait PatternDetector: Send + Sync {
    /// The kind of pattern this detector reports
    fn kind(&self) -> PatternKind;

    /// Scan the snapshot and return findings
    fn detect(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        config: &DetectionConfig,
    ) -> DetectionResult;
}
