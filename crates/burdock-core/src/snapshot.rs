//! In-memory neighbor fetching over a materialized edge list

use crate::edge::{Direction, Edge, EdgeType};
use crate::error::Result;
use crate::traversal::NeighborFetcher;
use async_trait::async_trait;

/// [`NeighborFetcher`] backed by a borrowed edge slice
///
/// For callers that already hold the subgraph in memory, and for tests.
/// Neighbor order follows edge list order, so traversals over a snapshot
/// are fully deterministic. Fetches never fail.
pub struct SnapshotFetcher<'a> {
    edges: &'a [Edge],
}

impl<'a> SnapshotFetcher<'a> {
    /// Create a fetcher over the given edges
    pub fn new(edges: &'a [Edge]) -> Self {
        Self { edges }
    }
}

#[async_trait]
impl NeighborFetcher for SnapshotFetcher<'_> {
    async fn fetch_neighbors(
        &self,
        node_id: &str,
        edge_types: &[EdgeType],
        direction: Direction,
    ) -> Result<Vec<String>> {
        let mut neighbors = Vec::new();

        for edge in self.edges {
            if !edge_types.is_empty() && !edge_types.contains(&edge.edge_type) {
                continue;
            }
            match direction {
                Direction::Outgoing => {
                    if edge.from == node_id {
                        neighbors.push(edge.to.clone());
                    }
                }
                Direction::Incoming => {
                    if edge.to == node_id {
                        neighbors.push(edge.from.clone());
                    }
                }
                Direction::Both => {
                    if edge.from == node_id {
                        neighbors.push(edge.to.clone());
                    } else if edge.to == node_id {
                        neighbors.push(edge.from.clone());
                    }
                }
            }
        }

        Ok(neighbors)
    }
}
