//! Circular dependency detection

use crate::config::DetectionConfig;
use crate::edge::Edge;
use crate::node::Node;
use crate::pattern::{
    DetectedPattern, DetectionResult, Effort, PatternDetector, PatternKind, Remediation, Severity,
};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Detects dependency cycles with an iterative three-color DFS
///
/// Nodes are white (untouched), gray (on the current DFS path), or black
/// (fully explored). An edge into a gray node is a back edge; the path
/// slice from that node to the current one is the cycle. Cycles that are
/// rotations of each other collapse to a single finding.
#[derive(Debug, Default, Clone, Copy)]
pub struct CycleDetector;

impl CycleDetector {
    pub fn new() -> Self {
        Self
    }

    /// Tight loops are the worst kind: self-loops and mutual dependencies
    /// are Critical, short cycles Error, long ones Warning
    fn severity_for_length(len: usize) -> Severity {
        match len {
            0..=2 => Severity::Critical,
            3..=5 => Severity::Error,
            _ => Severity::Warning,
        }
    }

    fn describe(cycle: &[String]) -> String {
        let mut chain = cycle.join(" -> ");
        chain.push_str(" -> ");
        chain.push_str(&cycle[0]);
        format!("Circular dependency through {} node(s): {}", cycle.len(), chain)
    }

    fn suggestions_for(cycle: &[String]) -> Vec<Remediation> {
        vec![
            Remediation::new(
                "extract_shared",
                "Move what the cycle's members need from each other into a new node",
                1,
                Effort::High,
            )
            .with_step("Identify what each member pulls from the others")
            .with_step("Extract that into a node outside the cycle")
            .with_step("Point the former members at the extracted node"),
            Remediation::new(
                "invert_dependency",
                format!(
                    "Invert one of the {} edges so the dependency flows one way",
                    cycle.len()
                ),
                2,
                Effort::Medium,
            )
            .with_step("Pick the weakest edge in the cycle")
            .with_step("Replace the direct reference with an indirection owned by its target"),
        ]
    }
}

impl PatternDetector for CycleDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::CircularDependency
    }

    fn detect(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        config: &DetectionConfig,
    ) -> DetectionResult {
        let excluded_nodes: HashSet<&str> = nodes
            .iter()
            .filter(|n| config.is_node_type_excluded(&n.node_type))
            .map(|n| n.id.as_str())
            .collect();

        // Adjacency over ids. Roots follow node list order, then edge
        // sources the node list never mentioned, so dangling ids still get
        // walked and the scan order stays deterministic.
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut roots: Vec<&str> = Vec::new();
        let mut seen_roots: HashSet<&str> = HashSet::new();

        for node in nodes {
            if !excluded_nodes.contains(node.id.as_str()) && seen_roots.insert(node.id.as_str()) {
                roots.push(node.id.as_str());
            }
        }
        for edge in edges {
            if config.is_edge_type_excluded(&edge.edge_type) {
                continue;
            }
            if excluded_nodes.contains(edge.from.as_str())
                || excluded_nodes.contains(edge.to.as_str())
            {
                continue;
            }
            adjacency
                .entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
            if seen_roots.insert(edge.from.as_str()) {
                roots.push(edge.from.as_str());
            }
        }

        let mut cycles: Vec<Vec<String>> = Vec::new();
        let mut reported: HashSet<BTreeSet<&str>> = HashSet::new();
        let mut resolved: HashSet<&str> = HashSet::new();
        let mut truncated = false;

        'roots: for &root in &roots {
            if resolved.contains(root) {
                continue;
            }

            let mut path: Vec<&str> = Vec::new();
            let mut on_path: HashSet<&str> = HashSet::new();
            let mut stack: Vec<(&str, Vec<&str>, usize)> = Vec::new();

            let root_children = adjacency.get(root).cloned().unwrap_or_default();
            stack.push((root, root_children, 0));
            path.push(root);
            on_path.insert(root);

            while let Some(frame) = stack.last_mut() {
                let (node, children, child_idx) = frame;
                let node = *node;

                if *child_idx >= children.len() {
                    stack.pop();
                    path.pop();
                    on_path.remove(node);
                    resolved.insert(node);
                    continue;
                }

                let child = children[*child_idx];
                *child_idx += 1;

                if on_path.contains(child) {
                    // Back edge: the path slice from the revisited node to
                    // here is a cycle
                    if let Some(pos) = path.iter().position(|&n| n == child) {
                        let members: Vec<&str> = path[pos..].to_vec();
                        let key: BTreeSet<&str> = members.iter().copied().collect();
                        if reported.insert(key) {
                            if cycles.len() >= config.max_cycles {
                                truncated = true;
                                break 'roots;
                            }
                            cycles.push(members.iter().map(|s| s.to_string()).collect());
                        }
                    }
                    continue;
                }

                if resolved.contains(child) {
                    continue;
                }

                let child_children = adjacency.get(child).cloned().unwrap_or_default();
                path.push(child);
                on_path.insert(child);
                stack.push((child, child_children, 0));
            }
        }

        let mut patterns = Vec::new();
        for cycle in &cycles {
            let severity = Self::severity_for_length(cycle.len());
            let mut pattern = DetectedPattern::new(
                PatternKind::CircularDependency,
                severity,
                Self::describe(cycle),
            )
            .with_nodes(cycle.clone());
            if config.include_suggestions {
                for suggestion in Self::suggestions_for(cycle) {
                    pattern = pattern.with_suggestion(suggestion);
                }
            }
            patterns.push(pattern);
        }

        if truncated {
            tracing::warn!(
                "Cycle cap of {} reached, remaining cycles were not enumerated",
                config.max_cycles
            );
        }

        tracing::debug!(
            "Cycle scan found {} cycle(s) across {} nodes",
            cycles.len(),
            nodes.len()
        );

        DetectionResult { patterns, truncated }
    }
}
