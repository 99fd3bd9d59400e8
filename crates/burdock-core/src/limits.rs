//! Input validation limits for resource protection

/// Maximum length for node ids (256 chars)
pub const MAX_NODE_ID_LEN: usize = 256;

/// Maximum traversal depth (50)
pub const MAX_TRAVERSAL_DEPTH: u32 = 50;

/// Maximum nodes visited in a single traversal (10000)
pub const MAX_TRAVERSAL_NODES: usize = 10000;

/// Maximum cycles a single scan may be configured to report (1000)
pub const MAX_REPORTED_CYCLES: usize = 1000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyNodeId,
    NodeIdTooLong { len: usize, max: usize },
    TraversalDepthTooLarge { depth: u32, max: u32 },
    CycleCapOutOfRange { cap: usize, max: usize },
    HubFactorNotPositive { factor: f64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNodeId => write!(f, "Node id cannot be empty"),
            Self::NodeIdTooLong { len, max } => {
                write!(f, "Node id too long: {} chars (max {})", len, max)
            }
            Self::TraversalDepthTooLarge { depth, max } => {
                write!(f, "Traversal depth too large: {} (max {})", depth, max)
            }
            Self::CycleCapOutOfRange { cap, max } => {
                write!(f, "Cycle cap out of range: {} (must be 1..={})", cap, max)
            }
            Self::HubFactorNotPositive { factor } => {
                write!(f, "Hub threshold factor must be finite and positive: {}", factor)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a node id
pub fn validate_node_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyNodeId);
    }
    if id.len() > MAX_NODE_ID_LEN {
        return Err(ValidationError::NodeIdTooLong {
            len: id.len(),
            max: MAX_NODE_ID_LEN,
        });
    }
    Ok(())
}

/// Validate traversal depth
pub fn validate_traversal_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(ValidationError::TraversalDepthTooLarge {
            depth,
            max: MAX_TRAVERSAL_DEPTH,
        });
    }
    Ok(())
}

/// Validate the configured cycle cap
pub fn validate_cycle_cap(cap: usize) -> Result<(), ValidationError> {
    if cap == 0 || cap > MAX_REPORTED_CYCLES {
        return Err(ValidationError::CycleCapOutOfRange {
            cap,
            max: MAX_REPORTED_CYCLES,
        });
    }
    Ok(())
}

/// Validate the hub stddev factor
pub fn validate_hub_factor(factor: f64) -> Result<(), ValidationError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ValidationError::HubFactorNotPositive { factor });
    }
    Ok(())
}
