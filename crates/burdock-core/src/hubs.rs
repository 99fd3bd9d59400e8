//! Hub node detection

use crate::config::DetectionConfig;
use crate::edge::Edge;
use crate::node::Node;
use crate::pattern::{
    DetectedPattern, DetectionResult, Effort, PatternDetector, PatternKind, Remediation, Severity,
};
use std::collections::HashMap;

/// Flags nodes whose connectivity is a statistical outlier
///
/// A node is a hub when its total degree exceeds mean + factor * stddev
/// over all candidate nodes, and also clears the absolute floor
/// `hub_min_degree`. The floor keeps tiny graphs from flagging every
/// mildly-connected node. When every node has the same degree the stddev
/// is zero and nothing is an outlier.
#[derive(Debug, Default, Clone, Copy)]
pub struct HubDetector;

impl HubDetector {
    pub fn new() -> Self {
        Self
    }

    fn severity_for_deviation(z: f64) -> Severity {
        if z > 4.0 {
            Severity::Critical
        } else if z > 3.0 {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl PatternDetector for HubDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::HubNode
    }

    fn detect(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        config: &DetectionConfig,
    ) -> DetectionResult {
        let mut degree: HashMap<&str, usize> = HashMap::new();
        for edge in edges {
            if config.is_edge_type_excluded(&edge.edge_type) {
                continue;
            }
            *degree.entry(edge.from.as_str()).or_insert(0) += 1;
            *degree.entry(edge.to.as_str()).or_insert(0) += 1;
        }

        // Statistics run over present, non-excluded nodes only; dangling
        // ids accumulate degree but are never candidates themselves.
        let candidates: Vec<(&Node, usize)> = nodes
            .iter()
            .filter(|n| !config.is_node_type_excluded(&n.node_type))
            .map(|n| (n, degree.get(n.id.as_str()).copied().unwrap_or(0)))
            .collect();

        if candidates.is_empty() {
            return DetectionResult::default();
        }

        let n = candidates.len() as f64;
        let mean = candidates.iter().map(|(_, d)| *d as f64).sum::<f64>() / n;
        let variance = candidates
            .iter()
            .map(|(_, d)| {
                let diff = *d as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let stddev = variance.sqrt();

        if stddev == 0.0 {
            tracing::debug!(
                "Hub scan skipped: uniform degree {} across {} nodes",
                mean,
                nodes.len()
            );
            return DetectionResult::default();
        }

        let threshold = mean + config.hub_stddev_factor * stddev;
        let mut patterns = Vec::new();

        for (node, deg) in candidates {
            if (deg as f64) <= threshold || deg < config.hub_min_degree {
                continue;
            }

            let z = (deg as f64 - mean) / stddev;
            let severity = Self::severity_for_deviation(z);
            let description = format!(
                "Node '{}' has degree {} against a graph mean of {:.1} ({:.1} standard deviations above)",
                node.id, deg, mean, z
            );

            let mut pattern = DetectedPattern::new(PatternKind::HubNode, severity, description)
                .with_node(node.id.clone());
            if config.include_suggestions {
                pattern = pattern
                    .with_suggestion(
                        Remediation::new(
                            "split_responsibilities",
                            format!("Split '{}' into narrower nodes", node.id),
                            1,
                            Effort::High,
                        )
                        .with_step("Group the node's edges by the concern they serve")
                        .with_step("Carve each concern into its own node")
                        .with_step("Repoint the existing edges at the new nodes"),
                    )
                    .with_suggestion(
                        Remediation::new(
                            "document_integration_point",
                            format!("Document '{}' as an intentional integration point", node.id),
                            2,
                            Effort::Low,
                        )
                        .with_step("Record why the concentration is deliberate")
                        .with_step("Exclude the node's type from future scans if it should stay"),
                    );
            }
            patterns.push(pattern);
        }

        tracing::debug!(
            "Hub scan found {} findings (mean degree {:.2}, stddev {:.2})",
            patterns.len(),
            mean,
            stddev
        );

        DetectionResult { patterns, truncated: false }
    }
}
