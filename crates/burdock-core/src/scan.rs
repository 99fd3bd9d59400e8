//! Pattern scan orchestration

use crate::config::DetectionConfig;
use crate::cycles::CycleDetector;
use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::hubs::HubDetector;
use crate::node::Node;
use crate::orphans::OrphanDetector;
use crate::pattern::{DetectedPattern, PatternDetector, PatternKind, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Aggregated result of a full pattern scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Findings that cleared the severity filter, grouped by detector run
    /// order (cycles, orphans, hubs)
    pub patterns: Vec<DetectedPattern>,

    /// Finding counts per pattern kind
    pub counts_by_kind: BTreeMap<PatternKind, usize>,

    /// Finding counts per severity
    pub counts_by_severity: BTreeMap<Severity, usize>,

    /// Whether any detector hit its reporting cap and stopped enumerating
    /// early; independent of the severity filter
    #[serde(default)]
    pub truncated: bool,

    /// The configuration the scan ran with
    pub config: DetectionConfig,

    /// When the scan finished
    pub generated_at: DateTime<Utc>,

    /// Wall-clock scan duration in milliseconds
    pub duration_ms: u64,
}

impl DetectionReport {
    /// Total number of reported findings
    pub fn total(&self) -> usize {
        self.patterns.len()
    }

    /// Findings of one kind
    pub fn of_kind(&self, kind: PatternKind) -> impl Iterator<Item = &DetectedPattern> {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }

    /// Whether anything at or above the given severity was found
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.patterns.iter().any(|p| p.severity >= severity)
    }
}

/// Runs the detector family over a graph snapshot
///
/// Detectors run one after another in a fixed order, each against the same
/// input slices, so a report is deterministic for a given graph and config
/// (up to timestamps and duration).
pub struct PatternScanner;

impl PatternScanner {
    /// Run every enabled detector and merge the findings into one report
    ///
    /// The config is validated up front; a bad cap or hub factor fails the
    /// whole scan before any detector runs. Detector execution itself never
    /// fails: malformed graph shapes produce findings, not errors.
    pub fn detect_all(
        nodes: &[Node],
        edges: &[Edge],
        config: &DetectionConfig,
    ) -> Result<DetectionReport> {
        config
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let started = Instant::now();
        tracing::debug!(
            "Scanning {} nodes / {} edges with {} detector(s) enabled",
            nodes.len(),
            edges.len(),
            config.enabled.len()
        );

        let detectors: [&dyn PatternDetector; 3] = [&CycleDetector, &OrphanDetector, &HubDetector];

        let mut patterns: Vec<DetectedPattern> = Vec::new();
        let mut truncated = false;
        for detector in detectors {
            if !config.is_enabled(detector.kind()) {
                continue;
            }
            let result = detector.detect(nodes, edges, config);
            tracing::debug!(
                "{} detector returned {} finding(s)",
                detector.kind(),
                result.patterns.len()
            );
            truncated |= result.truncated;
            patterns.extend(result.patterns);
        }

        patterns.retain(|p| p.severity >= config.min_severity);

        let mut counts_by_kind: BTreeMap<PatternKind, usize> = BTreeMap::new();
        let mut counts_by_severity: BTreeMap<Severity, usize> = BTreeMap::new();
        for pattern in &patterns {
            *counts_by_kind.entry(pattern.kind).or_insert(0) += 1;
            *counts_by_severity.entry(pattern.severity).or_insert(0) += 1;
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::debug!("Scan finished: {} finding(s) in {}ms", patterns.len(), duration_ms);

        Ok(DetectionReport {
            patterns,
            counts_by_kind,
            counts_by_severity,
            truncated,
            config: config.clone(),
            generated_at: Utc::now(),
            duration_ms,
        })
    }
}
