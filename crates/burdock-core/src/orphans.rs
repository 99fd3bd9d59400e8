//! Orphaned node detection

use crate::config::DetectionConfig;
use crate::edge::Edge;
use crate::node::Node;
use crate::pattern::{
    DetectedPattern, DetectionResult, Effort, PatternDetector, PatternKind, Remediation, Severity,
};
use std::collections::HashMap;

/// How a node is cut off from the rest of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationKind {
    /// No edges at all
    FullyIsolated,
    /// Outgoing edges only, nothing points at it
    SourceOnly,
    /// Incoming edges only, points at nothing
    SinkOnly,
}

/// Detects nodes disconnected from the rest of the graph
///
/// Fully isolated nodes are always reported. Sources and sinks are normal
/// in most graphs (entry points, leaf artifacts), so they are reported only
/// when the config opts in via `report_sources` / `report_sinks`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrphanDetector;

impl OrphanDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify a node's isolation from its degree pair
    ///
    /// `None` means the node has edges in both directions.
    pub fn classify(in_degree: usize, out_degree: usize) -> Option<IsolationKind> {
        match (in_degree, out_degree) {
            (0, 0) => Some(IsolationKind::FullyIsolated),
            (0, _) => Some(IsolationKind::SourceOnly),
            (_, 0) => Some(IsolationKind::SinkOnly),
            _ => None,
        }
    }

    fn suggestions_for(kind: IsolationKind, node_id: &str) -> Vec<Remediation> {
        match kind {
            IsolationKind::FullyIsolated => vec![
                Remediation::new(
                    "remove_dead_code",
                    format!("Remove '{}' if it no longer serves a purpose", node_id),
                    1,
                    Effort::Low,
                )
                .with_step("Confirm no external consumer references the node")
                .with_step("Delete the node and any stale metadata"),
                Remediation::new(
                    "document_intent",
                    format!("Document '{}' as intentionally standalone", node_id),
                    2,
                    Effort::Low,
                )
                .with_step("Record why the node has no connections"),
                Remediation::new(
                    "investigate_wiring",
                    "Check whether edges for this node were never created",
                    3,
                    Effort::Medium,
                )
                .with_step("Review the producers that should have linked the node")
                .with_step("Re-run the ingestion that builds edges"),
            ],
            IsolationKind::SourceOnly => vec![
                Remediation::new(
                    "document_intent",
                    format!("Document '{}' as an intentional entry point", node_id),
                    1,
                    Effort::Low,
                )
                .with_step("Record that nothing is expected to reference the node"),
                Remediation::new(
                    "investigate_wiring",
                    "Check whether incoming references are missing",
                    2,
                    Effort::Medium,
                )
                .with_step("Review the consumers that should point at the node"),
            ],
            IsolationKind::SinkOnly => vec![
                Remediation::new(
                    "document_intent",
                    format!("Document '{}' as an intentional exit point", node_id),
                    1,
                    Effort::Low,
                )
                .with_step("Record that the node is expected to reference nothing"),
                Remediation::new(
                    "investigate_wiring",
                    "Check whether outgoing references are missing",
                    2,
                    Effort::Medium,
                )
                .with_step("Review what the node should depend on"),
            ],
        }
    }
}

impl PatternDetector for OrphanDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::OrphanedNode
    }

    fn detect(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        config: &DetectionConfig,
    ) -> DetectionResult {
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        let mut out_degree: HashMap<&str, usize> = HashMap::new();

        for edge in edges {
            if config.is_edge_type_excluded(&edge.edge_type) {
                continue;
            }
            *out_degree.entry(edge.from.as_str()).or_insert(0) += 1;
            *in_degree.entry(edge.to.as_str()).or_insert(0) += 1;
        }

        let mut patterns = Vec::new();

        for node in nodes {
            if config.is_node_type_excluded(&node.node_type) {
                continue;
            }

            let in_deg = in_degree.get(node.id.as_str()).copied().unwrap_or(0);
            let out_deg = out_degree.get(node.id.as_str()).copied().unwrap_or(0);

            let kind = match Self::classify(in_deg, out_deg) {
                Some(kind) => kind,
                None => continue,
            };

            let (severity, description) = match kind {
                IsolationKind::FullyIsolated => (
                    Severity::Warning,
                    format!(
                        "Node '{}' ({}) has no incoming or outgoing edges",
                        node.id, node.node_type
                    ),
                ),
                IsolationKind::SourceOnly => {
                    if !config.report_sources {
                        continue;
                    }
                    (
                        Severity::Info,
                        format!(
                            "Node '{}' ({}) has outgoing edges but nothing references it",
                            node.id, node.node_type
                        ),
                    )
                }
                IsolationKind::SinkOnly => {
                    if !config.report_sinks {
                        continue;
                    }
                    (
                        Severity::Info,
                        format!(
                            "Node '{}' ({}) has incoming edges but references nothing",
                            node.id, node.node_type
                        ),
                    )
                }
            };

            let mut pattern = DetectedPattern::new(PatternKind::OrphanedNode, severity, description)
                .with_node(node.id.clone());
            if config.include_suggestions {
                for suggestion in Self::suggestions_for(kind, &node.id) {
                    pattern = pattern.with_suggestion(suggestion);
                }
            }
            patterns.push(pattern);
        }

        tracing::debug!(
            "Orphan scan found {} findings across {} nodes",
            patterns.len(),
            nodes.len()
        );

        DetectionResult { patterns, truncated: false }
    }
}
