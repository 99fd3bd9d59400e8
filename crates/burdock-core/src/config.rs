//! Detection configuration shared by all detectors

use crate::edge::EdgeType;
use crate::limits::{validate_cycle_cap, validate_hub_factor, ValidationError};
use crate::node::NodeType;
use crate::pattern::{PatternKind, Severity};
use serde::{Deserialize, Serialize};

/// Configuration for a pattern detection scan
///
/// One config drives the whole detector family. Every field has a default,
/// so `DetectionConfig::default()` runs all detectors at full verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Which detectors to run
    #[serde(default = "default_enabled")]
    pub enabled: Vec<PatternKind>,

    /// Minimum severity a finding must reach to be reported
    #[serde(default)]
    pub min_severity: Severity,

    /// Node type labels left out of every detector
    #[serde(default)]
    pub excluded_node_types: Vec<NodeType>,

    /// Edge type labels left out of every detector
    #[serde(default)]
    pub excluded_edge_types: Vec<EdgeType>,

    /// Report source nodes (outgoing edges only) as partially isolated
    #[serde(default)]
    pub report_sources: bool,

    /// Report sink nodes (incoming edges only) as partially isolated
    #[serde(default)]
    pub report_sinks: bool,

    /// Attach remediation suggestions to findings
    #[serde(default = "default_true")]
    pub include_suggestions: bool,

    /// Maximum cycles reported per scan
    ///
    /// Hitting the cap sets the truncated flag on the detector result and
    /// the report, so a capped scan is never mistaken for a complete one.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,

    /// Hub threshold: flag nodes with degree above mean + factor * stddev
    #[serde(default = "default_hub_stddev_factor")]
    pub hub_stddev_factor: f64,

    /// Absolute degree floor below which a node is never flagged as a hub
    #[serde(default = "default_hub_min_degree")]
    pub hub_min_degree: usize,
}

fn default_enabled() -> Vec<PatternKind> {
    PatternKind::all().to_vec()
}

fn default_true() -> bool {
    true
}

fn default_max_cycles() -> usize {
    100
}

fn default_hub_stddev_factor() -> f64 {
    2.0
}

fn default_hub_min_degree() -> usize {
    5
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_severity: Severity::Info,
            excluded_node_types: Vec::new(),
            excluded_edge_types: Vec::new(),
            report_sources: false,
            report_sinks: false,
            include_suggestions: default_true(),
            max_cycles: default_max_cycles(),
            hub_stddev_factor: default_hub_stddev_factor(),
            hub_min_degree: default_hub_min_degree(),
        }
    }
}

impl DetectionConfig {
    /// Create a config with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Run only the given detectors
    pub fn with_detectors(mut self, kinds: Vec<PatternKind>) -> Self {
        self.enabled = kinds;
        self
    }

    /// Set the minimum reported severity
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Exclude a node type from every detector
    pub fn exclude_node_type(mut self, node_type: impl Into<NodeType>) -> Self {
        self.excluded_node_types.push(node_type.into());
        self
    }

    /// Exclude an edge type from every detector
    pub fn exclude_edge_type(mut self, edge_type: impl Into<EdgeType>) -> Self {
        self.excluded_edge_types.push(edge_type.into());
        self
    }

    /// Also report source nodes (outgoing edges only)
    pub fn report_sources(mut self) -> Self {
        self.report_sources = true;
        self
    }

    /// Also report sink nodes (incoming edges only)
    pub fn report_sinks(mut self) -> Self {
        self.report_sinks = true;
        self
    }

    /// Skip remediation suggestions
    pub fn without_suggestions(mut self) -> Self {
        self.include_suggestions = false;
        self
    }

    /// Set the cycle reporting cap
    pub fn with_max_cycles(mut self, cap: usize) -> Self {
        self.max_cycles = cap;
        self
    }

    /// Set the hub thresholds (stddev factor and absolute degree floor)
    pub fn with_hub_thresholds(mut self, factor: f64, min_degree: usize) -> Self {
        self.hub_stddev_factor = factor;
        self.hub_min_degree = min_degree;
        self
    }

    /// Whether a detector kind should run
    pub fn is_enabled(&self, kind: PatternKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Whether a node type label is excluded
    pub fn is_node_type_excluded(&self, node_type: &NodeType) -> bool {
        self.excluded_node_types.contains(node_type)
    }

    /// Whether an edge type label is excluded
    pub fn is_edge_type_excluded(&self, edge_type: &EdgeType) -> bool {
        self.excluded_edge_types.contains(edge_type)
    }

    /// Validate tuning parameters
    ///
    /// Type label filters are deliberately not validated: an unknown label
    /// simply matches nothing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_cycle_cap(self.max_cycles)?;
        validate_hub_factor(self.hub_stddev_factor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DetectionConfig::default();

        assert_eq!(config.enabled.len(), 3);
        assert_eq!(config.min_severity, Severity::Info);
        assert!(!config.report_sources);
        assert!(!config.report_sinks);
        assert!(config.include_suggestions);
        assert_eq!(config.max_cycles, 100);
        assert_eq!(config.hub_stddev_factor, 2.0);
        assert_eq!(config.hub_min_degree, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DetectionConfig::new()
            .with_detectors(vec![PatternKind::HubNode])
            .with_min_severity(Severity::Warning)
            .exclude_node_type("generated")
            .exclude_edge_type("annotates")
            .report_sources()
            .with_max_cycles(10)
            .with_hub_thresholds(3.0, 8);

        assert!(config.is_enabled(PatternKind::HubNode));
        assert!(!config.is_enabled(PatternKind::CircularDependency));
        assert_eq!(config.min_severity, Severity::Warning);
        assert!(config.is_node_type_excluded(&"generated".into()));
        assert!(!config.is_node_type_excluded(&"service".into()));
        assert!(config.is_edge_type_excluded(&"annotates".into()));
        assert!(config.report_sources);
        assert!(!config.report_sinks);
        assert_eq!(config.max_cycles, 10);
        assert_eq!(config.hub_stddev_factor, 3.0);
        assert_eq!(config.hub_min_degree, 8);
    }

    #[test]
    fn test_config_validation() {
        assert!(DetectionConfig::new().with_max_cycles(0).validate().is_err());
        assert!(DetectionConfig::new().with_max_cycles(5000).validate().is_err());
        assert!(DetectionConfig::new()
            .with_hub_thresholds(0.0, 5)
            .validate()
            .is_err());
        assert!(DetectionConfig::new()
            .with_hub_thresholds(f64::NAN, 5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: DetectionConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.enabled.len(), 3);
        assert_eq!(config.min_severity, Severity::Info);
        assert!(config.include_suggestions);
        assert_eq!(config.max_cycles, 100);

        let config: DetectionConfig =
            serde_json::from_str(r#"{"min_severity":"error","report_sinks":true}"#).unwrap();
        assert_eq!(config.min_severity, Severity::Error);
        assert!(config.report_sinks);
        assert!(!config.report_sources);
    }
}
