//! Error types for Burdock Core

use thiserror::Error;

/// Result type alias using Burdock's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Burdock error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid detection config: {0}")]
    InvalidConfig(String),

    #[error("Neighbor fetch failed for '{node_id}': {message}")]
    Fetch { node_id: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for fetch failures raised by
    /// [`crate::traversal::NeighborFetcher`] implementations
    pub fn fetch(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            node_id: node_id.into(),
            message: message.into(),
        }
    }
}

impl From<crate::limits::ValidationError> for Error {
    fn from(e: crate::limits::ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}
