//! Shortest path strategies implementing the Strategy pattern.
//!
//! This module provides the `ShortestPathPlanner` trait and implementations
//! for Bellman-Ford and Dijkstra. `plan_route` only talks to the trait, so a
//! new algorithm does not touch the orchestration logic.

use crate::error::Result;
use crate::graph::Graph;
use crate::network::LocationId;
use crate::path::{bellman_ford, dijkstra, ShortestPathAlgorithm, ShortestPathResult};

use super::RouteAlgorithm;

/// Trait for single-source shortest path strategies.
pub trait ShortestPathPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> ShortestPathAlgorithm;

    /// Compute distances and predecessors from `source`.
    fn shortest_paths(&self, graph: &Graph, source: LocationId) -> Result<ShortestPathResult>;
}

/// Bellman-Ford planner; handles discounts and detects negative cycles.
#[derive(Debug, Clone, Default)]
pub struct BellmanFordPlanner;

impl ShortestPathPlanner for BellmanFordPlanner {
    fn algorithm(&self) -> ShortestPathAlgorithm {
        ShortestPathAlgorithm::BellmanFord
    }

    fn shortest_paths(&self, graph: &Graph, source: LocationId) -> Result<ShortestPathResult> {
        Ok(bellman_ford(graph, source))
    }
}

/// Dijkstra planner; only valid when every fare is non-negative.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl ShortestPathPlanner for DijkstraPlanner {
    fn algorithm(&self) -> ShortestPathAlgorithm {
        ShortestPathAlgorithm::Dijkstra
    }

    fn shortest_paths(&self, graph: &Graph, source: LocationId) -> Result<ShortestPathResult> {
        dijkstra(graph, source)
    }
}

/// Select the planner for the requested algorithm.
///
/// `Auto` uses Dijkstra when the graph has no discounted fare and falls back
/// to Bellman-Ford as soon as one negative edge is present.
pub fn select_planner(algorithm: RouteAlgorithm, graph: &Graph) -> Box<dyn ShortestPathPlanner> {
    match algorithm {
        RouteAlgorithm::BellmanFord => Box::new(BellmanFordPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::Auto if graph.has_negative_edge() => Box::new(BellmanFordPlanner),
        RouteAlgorithm::Auto => Box::new(DijkstraPlanner),
    }
}
