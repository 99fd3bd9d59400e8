//! Burdock Core - Structural analysis engine for directed graphs
//!
//! This crate provides the graph data model, the capability-driven
//! traversal engine, and the pattern detectors (cycles, orphans, hubs)
//! for the Burdock analysis toolkit.

pub mod config;
pub mod cycles;
pub mod edge;
pub mod error;
pub mod hubs;
pub mod limits;
pub mod node;
pub mod orphans;
pub mod pattern;
pub mod scan;
pub mod snapshot;
pub mod traversal;

pub use config::DetectionConfig;
pub use cycles::CycleDetector;
pub use edge::{Direction, Edge, EdgeType};
pub use error::{Error, Result};
pub use hubs::HubDetector;
pub use node::{Node, NodeType};
pub use orphans::{IsolationKind, OrphanDetector};
pub use pattern::{
    DetectedPattern, DetectionResult, Effort, PatternDetector, PatternKind, Remediation, Severity,
};
pub use scan::{DetectionReport, PatternScanner};
pub use snapshot::SnapshotFetcher;
pub use traversal::{NeighborFetcher, TraversalEngine, TraversalRequest, TraversalResult};
