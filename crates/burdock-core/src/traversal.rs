//! Graph traversal types and algorithms

use crate::edge::{Direction, EdgeType};
use crate::error::Result;
use crate::limits::{validate_node_id, validate_traversal_depth, MAX_TRAVERSAL_NODES};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Capability for resolving a node's neighbors
///
/// This is the engine's only window onto the graph: callers hand in an
/// implementation backed by whatever holds their edges (an in-memory
/// snapshot, a database, a remote service). The engine asks for ids and
/// nothing else, so it never learns where the graph lives.
#[async_trait]
pub trait NeighborFetcher: Send + Sync {
    /// Return ids of nodes adjacent to `node_id`
    ///
    /// `edge_types` is an allow-list; an empty slice means every edge type.
    /// `direction` selects which endpoint of an edge counts as adjacent.
    async fn fetch_neighbors(
        &self,
        node_id: &str,
        edge_types: &[EdgeType],
        direction: Direction,
    ) -> Result<Vec<String>>;
}

/// Traversal request builder (follows DetectionConfig pattern)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalRequest {
    /// Starting node id
    pub start: String,

    /// Maximum traversal depth (0 = the start node only)
    pub max_depth: u32,

    /// Traversal direction
    #[serde(default)]
    pub direction: Direction,

    /// Follow only these edge types (empty = all types)
    #[serde(default)]
    pub edge_types: Vec<EdgeType>,
}

impl TraversalRequest {
    /// Create a new traversal request
    pub fn new(start: impl Into<String>, max_depth: u32) -> Self {
        Self {
            start: start.into(),
            max_depth,
            direction: Direction::Both,
            edge_types: Vec::new(),
        }
    }

    /// Set traversal direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Follow only the given edge types
    pub fn with_edge_types(mut self, types: Vec<EdgeType>) -> Self {
        self.edge_types = types;
        self
    }
}

/// Result of a traversal operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Node ids in breadth-first discovery order, start first
    pub visited: Vec<String>,

    /// Number of nodes visited
    pub visited_count: usize,

    /// Deepest level actually reached
    pub max_depth_reached: u32,

    /// Whether any node was reachable along more than one path
    ///
    /// Set when a node comes up again after being visited. This covers true
    /// cycles and also converging branches (a diamond), so it reads as
    /// "the subgraph is not a tree" rather than "a cycle exists".
    pub cycle_detected: bool,

    /// Whether any neighbor fetch failed and was skipped
    pub partial: bool,

    /// Ids whose neighbor fetch failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_nodes: Vec<String>,
}

/// Graph traversal engine
///
/// Stateless: all bookkeeping lives in per-call structures, so one engine
/// value (or none at all, the methods are associated functions) serves any
/// number of concurrent traversals.
pub struct TraversalEngine;

impl TraversalEngine {
    /// Breadth-first traversal from `request.start`
    ///
    /// Neighbor fetches run one node at a time, which keeps visit order
    /// deterministic for a fetcher with stable output. A failed fetch is
    /// logged, recorded in `failed_nodes`, and skipped; the traversal
    /// carries on through the remaining frontier.
    pub async fn traverse(
        request: &TraversalRequest,
        fetcher: &dyn NeighborFetcher,
    ) -> Result<TraversalResult> {
        validate_node_id(&request.start)?;
        validate_traversal_depth(request.max_depth)?;

        tracing::debug!(
            "Executing traversal: start={}, depth={}, direction={:?}",
            request.start,
            request.max_depth,
            request.direction
        );

        let mut visited: HashSet<String> = HashSet::new();
        let mut order: Vec<String> = Vec::new();
        let mut queue: VecDeque<(String, u32)> = VecDeque::new();
        let mut max_depth_reached = 0;
        let mut cycle_detected = false;
        let mut failed_nodes: Vec<String> = Vec::new();

        queue.push_back((request.start.clone(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if visited.contains(&current) {
                // Reached again along a second path
                cycle_detected = true;
                continue;
            }

            visited.insert(current.clone());
            order.push(current.clone());
            max_depth_reached = max_depth_reached.max(depth);

            if order.len() >= MAX_TRAVERSAL_NODES {
                tracing::warn!(
                    "Traversal from '{}' hit the {} node cap, stopping early",
                    request.start,
                    MAX_TRAVERSAL_NODES
                );
                break;
            }

            // Frontier nodes are visited but not expanded
            if depth >= request.max_depth {
                continue;
            }

            match fetcher
                .fetch_neighbors(&current, &request.edge_types, request.direction)
                .await
            {
                Ok(neighbors) => {
                    for neighbor in neighbors {
                        if visited.contains(&neighbor) {
                            cycle_detected = true;
                        } else {
                            queue.push_back((neighbor, depth + 1));
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Neighbor fetch failed for '{}': {}", current, e);
                    failed_nodes.push(current.clone());
                }
            }
        }

        let result = TraversalResult {
            visited_count: order.len(),
            visited: order,
            max_depth_reached,
            cycle_detected,
            partial: !failed_nodes.is_empty(),
            failed_nodes,
        };

        tracing::debug!(
            "Traversal visited {} nodes (max depth {}, cycle: {}, partial: {})",
            result.visited_count,
            result.max_depth_reached,
            result.cycle_detected,
            result.partial
        );

        Ok(result)
    }

    /// Node ids reachable from `start` within `max_depth` hops, ignoring
    /// edge direction
    pub async fn connected_nodes(
        start: &str,
        max_depth: u32,
        fetcher: &dyn NeighborFetcher,
        exclude_start: bool,
    ) -> Result<Vec<String>> {
        let request = TraversalRequest::new(start, max_depth).with_direction(Direction::Both);
        let result = Self::traverse(&request, fetcher).await?;

        let mut nodes = result.visited;
        if exclude_start {
            nodes.retain(|n| n != start);
        }
        Ok(nodes)
    }

    /// Unweighted shortest path from `request.start` to `target`
    ///
    /// Returns the node ids along the path, endpoints included. `None`
    /// means no path was found within `request.max_depth` hops: either
    /// none exists, or every route ran through a node whose neighbor
    /// fetch failed. Failed fetches are skipped and logged, as in
    /// [`Self::traverse`], so a flaky backend can hide a real path.
    pub async fn find_path(
        request: &TraversalRequest,
        target: &str,
        fetcher: &dyn NeighborFetcher,
    ) -> Result<Option<Vec<String>>> {
        validate_node_id(&request.start)?;
        validate_node_id(target)?;
        validate_traversal_depth(request.max_depth)?;

        if request.start == target {
            return Ok(Some(vec![request.start.clone()]));
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut parent: HashMap<String, String> = HashMap::new();
        let mut queue: VecDeque<(String, u32)> = VecDeque::new();

        visited.insert(request.start.clone());
        queue.push_back((request.start.clone(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= request.max_depth {
                continue;
            }
            if visited.len() >= MAX_TRAVERSAL_NODES {
                tracing::warn!(
                    "Path search from '{}' hit the {} node cap, stopping early",
                    request.start,
                    MAX_TRAVERSAL_NODES
                );
                break;
            }

            let neighbors = match fetcher
                .fetch_neighbors(&current, &request.edge_types, request.direction)
                .await
            {
                Ok(neighbors) => neighbors,
                Err(e) => {
                    tracing::warn!("Neighbor fetch failed for '{}': {}", current, e);
                    continue;
                }
            };

            for neighbor in neighbors {
                if visited.contains(&neighbor) {
                    continue;
                }
                visited.insert(neighbor.clone());
                parent.insert(neighbor.clone(), current.clone());

                if neighbor == target {
                    tracing::debug!("Path search found target at depth {}", depth + 1);
                    return Ok(Some(Self::reconstruct_path(&request.start, target, &parent)));
                }

                queue.push_back((neighbor, depth + 1));
            }
        }

        Ok(None)
    }

    /// Reconstruct a path from the BFS parent map
    fn reconstruct_path(start: &str, end: &str, parent: &HashMap<String, String>) -> Vec<String> {
        let mut path = vec![end.to_string()];
        let mut current = end.to_string();

        while current != start {
            if let Some(prev) = parent.get(&current) {
                path.push(prev.clone());
                current = prev.clone();
            } else {
                break;
            }
        }

        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::error::Error;
    use crate::snapshot::SnapshotFetcher;

    fn diamond() -> Vec<Edge> {
        // a -> b -> d
        // a -> c -> d
        vec![
            Edge::new("a", "b", "depends_on"),
            Edge::new("a", "c", "depends_on"),
            Edge::new("b", "d", "depends_on"),
            Edge::new("c", "d", "depends_on"),
        ]
    }

    fn chain() -> Vec<Edge> {
        vec![
            Edge::new("a", "b", "depends_on"),
            Edge::new("b", "c", "depends_on"),
            Edge::new("c", "d", "depends_on"),
        ]
    }

    /// Fails fetches for one node, serves the rest from the edge list
    struct FailingFetcher {
        edges: Vec<Edge>,
        fail_on: &'static str,
    }

    #[async_trait]
    impl NeighborFetcher for FailingFetcher {
        async fn fetch_neighbors(
            &self,
            node_id: &str,
            edge_types: &[EdgeType],
            direction: Direction,
        ) -> Result<Vec<String>> {
            if node_id == self.fail_on {
                return Err(Error::fetch(node_id, "backend unavailable"));
            }
            SnapshotFetcher::new(&self.edges)
                .fetch_neighbors(node_id, edge_types, direction)
                .await
        }
    }

    /// Decodes neighbor lists from stored JSON, propagating parse errors
    struct JsonFetcher {
        payloads: HashMap<String, String>,
    }

    #[async_trait]
    impl NeighborFetcher for JsonFetcher {
        async fn fetch_neighbors(
            &self,
            node_id: &str,
            _edge_types: &[EdgeType],
            _direction: Direction,
        ) -> Result<Vec<String>> {
            match self.payloads.get(node_id) {
                Some(raw) => Ok(serde_json::from_str(raw)?),
                None => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn test_traverse_visits_each_node_once() {
        let edges = diamond();
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 5).with_direction(Direction::Outgoing);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a", "b", "c", "d"]);
        assert_eq!(result.visited_count, 4);
        assert_eq!(result.max_depth_reached, 2);
        assert!(!result.partial);
    }

    #[tokio::test]
    async fn test_converging_branches_flag_revisit() {
        let edges = diamond();
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 5).with_direction(Direction::Outgoing);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        // d is reachable via b and via c
        assert!(result.cycle_detected);
    }

    #[tokio::test]
    async fn test_traverse_depth_zero_returns_start_only() {
        // A fetcher that would fail if consulted at all
        let fetcher = FailingFetcher {
            edges: Vec::new(),
            fail_on: "a",
        };
        let request = TraversalRequest::new("a", 0);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a"]);
        assert_eq!(result.max_depth_reached, 0);
        assert!(!result.partial);
        assert!(!result.cycle_detected);
    }

    #[tokio::test]
    async fn test_traverse_depth_bound() {
        let edges = chain();
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 2).with_direction(Direction::Outgoing);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a", "b", "c"]);
        assert_eq!(result.max_depth_reached, 2);
    }

    #[tokio::test]
    async fn test_traverse_two_node_cycle() {
        let edges = vec![
            Edge::new("a", "b", "depends_on"),
            Edge::new("b", "a", "depends_on"),
        ];
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 5).with_direction(Direction::Outgoing);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a", "b"]);
        assert!(result.cycle_detected);
    }

    #[tokio::test]
    async fn test_traverse_self_loop() {
        let edges = vec![Edge::new("a", "a", "depends_on")];
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 3).with_direction(Direction::Outgoing);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a"]);
        assert!(result.cycle_detected);
    }

    #[tokio::test]
    async fn test_traverse_direction() {
        let edges = chain();

        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("b", 1).with_direction(Direction::Outgoing);
        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();
        assert_eq!(result.visited, vec!["b", "c"]);

        let request = TraversalRequest::new("b", 1).with_direction(Direction::Incoming);
        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();
        assert_eq!(result.visited, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_traverse_edge_type_filter() {
        let edges = vec![
            Edge::new("a", "b", "depends_on"),
            Edge::new("b", "c", "references"),
        ];
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 3)
            .with_direction(Direction::Outgoing)
            .with_edge_types(vec!["depends_on".into()]);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_traverse_fetch_failure_is_partial() {
        let fetcher = FailingFetcher {
            edges: chain(),
            fail_on: "b",
        };
        let request = TraversalRequest::new("a", 5).with_direction(Direction::Outgoing);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        // b itself is visited; its expansion failed, so c and d are not
        assert_eq!(result.visited, vec!["a", "b"]);
        assert!(result.partial);
        assert_eq!(result.failed_nodes, vec!["b"]);
    }

    #[tokio::test]
    async fn test_traverse_decode_failure_is_partial() {
        let mut payloads = HashMap::new();
        payloads.insert("a".to_string(), r#"["b"]"#.to_string());
        payloads.insert("b".to_string(), "not json".to_string());
        let fetcher = JsonFetcher { payloads };
        let request = TraversalRequest::new("a", 5);

        let result = TraversalEngine::traverse(&request, &fetcher).await.unwrap();

        assert_eq!(result.visited, vec!["a", "b"]);
        assert!(result.partial);
        assert_eq!(result.failed_nodes, vec!["b"]);
    }

    #[tokio::test]
    async fn test_traverse_rejects_invalid_input() {
        let edges = chain();
        let fetcher = SnapshotFetcher::new(&edges);

        let empty = TraversalRequest::new("", 3);
        assert!(TraversalEngine::traverse(&empty, &fetcher).await.is_err());

        let too_deep = TraversalRequest::new("a", 51);
        assert!(TraversalEngine::traverse(&too_deep, &fetcher).await.is_err());
    }

    #[tokio::test]
    async fn test_connected_nodes() {
        let edges = chain();
        let fetcher = SnapshotFetcher::new(&edges);

        let nodes = TraversalEngine::connected_nodes("b", 1, &fetcher, true)
            .await
            .unwrap();
        assert_eq!(nodes, vec!["a", "c"]);

        let nodes = TraversalEngine::connected_nodes("b", 1, &fetcher, false)
            .await
            .unwrap();
        assert_eq!(nodes, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_find_path() {
        let edges = diamond();
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 5).with_direction(Direction::Outgoing);

        let path = TraversalEngine::find_path(&request, "d", &fetcher)
            .await
            .unwrap();
        assert_eq!(path, Some(vec!["a".to_string(), "b".to_string(), "d".to_string()]));
    }

    #[tokio::test]
    async fn test_find_path_blocked_by_fetch_failure() {
        // the only route to d runs through b, whose fetch fails
        let fetcher = FailingFetcher {
            edges: chain(),
            fail_on: "b",
        };
        let request = TraversalRequest::new("a", 5).with_direction(Direction::Outgoing);

        let path = TraversalEngine::find_path(&request, "d", &fetcher)
            .await
            .unwrap();
        assert_eq!(path, None);
    }

    #[tokio::test]
    async fn test_find_path_unreachable() {
        let edges = chain();
        let fetcher = SnapshotFetcher::new(&edges);

        // d has no outgoing edges
        let request = TraversalRequest::new("d", 5).with_direction(Direction::Outgoing);
        let path = TraversalEngine::find_path(&request, "a", &fetcher)
            .await
            .unwrap();
        assert_eq!(path, None);

        // reachable, but not within the depth bound
        let request = TraversalRequest::new("a", 1).with_direction(Direction::Outgoing);
        let path = TraversalEngine::find_path(&request, "d", &fetcher)
            .await
            .unwrap();
        assert_eq!(path, None);
    }

    #[tokio::test]
    async fn test_find_path_to_self() {
        let edges = chain();
        let fetcher = SnapshotFetcher::new(&edges);
        let request = TraversalRequest::new("a", 5);

        let path = TraversalEngine::find_path(&request, "a", &fetcher)
            .await
            .unwrap();
        assert_eq!(path, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_request_serde_defaults() {
        let request: TraversalRequest =
            serde_json::from_str(r#"{"start":"a","max_depth":3}"#).unwrap();

        assert_eq!(request.start, "a");
        assert_eq!(request.max_depth, 3);
        assert_eq!(request.direction, Direction::Both);
        assert!(request.edge_types.is_empty());

        // max_depth is required
        let missing: std::result::Result<TraversalRequest, _> =
            serde_json::from_str(r#"{"start":"a"}"#);
        assert!(missing.is_err());
    }
}
