//! Route planning over fare graphs.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Shortest path algorithm selection (auto, Bellman-Ford, Dijkstra)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Everything one query computed, owned together with its graph
//! - [`plan_route`] - Main entry point: synthesize, solve, enumerate, rank
//! - [`plan_on_graph`] - The same pipeline over a caller-supplied graph
//!
//! # Strategy Pattern
//!
//! Shortest path algorithms sit behind the [`ShortestPathPlanner`] trait so
//! the orchestration below does not care which one ran.
//!
//! # Example
//!
//! ```ignore
//! use farepath_lib::{plan_route, Network, RouteRequest};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let request = RouteRequest::new("Mumbai", "Kolkata");
//! let plan = plan_route(Network::builtin(), &request, &mut rng)?;
//! println!("{} simple paths", plan.ranked.len());
//! ```

mod planner;

pub use planner::{select_planner, BellmanFordPlanner, DijkstraPlanner, ShortestPathPlanner};

use std::fmt;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::enumerate::{enumerate_simple_paths, DEFAULT_PATH_LIMIT};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::network::{LocationId, Network};
use crate::path::ShortestPathResult;
use crate::rank::{rank, RankedPaths};
use crate::synth::{synthesize, SynthesisOptions};

/// Shortest path algorithm requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra when every fare is non-negative, Bellman-Ford otherwise.
    #[default]
    Auto,
    /// Bellman-Ford with negative cycle detection.
    BellmanFord,
    /// Dijkstra; rejects graphs with discounts.
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Auto => "auto",
            RouteAlgorithm::BellmanFord => "bellman-ford",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Source location as an id or a name.
    pub source: String,
    /// Destination location as an id or a name.
    pub destination: String,
    pub algorithm: RouteAlgorithm,
    pub synthesis: SynthesisOptions,
    /// Maximum number of simple paths to enumerate.
    pub path_limit: usize,
}

impl RouteRequest {
    /// Request with default algorithm, synthesis options and path limit.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            algorithm: RouteAlgorithm::default(),
            synthesis: SynthesisOptions::default(),
            path_limit: DEFAULT_PATH_LIMIT,
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_synthesis(mut self, synthesis: SynthesisOptions) -> Self {
        self.synthesis = synthesis;
        self
    }

    pub fn with_path_limit(mut self, path_limit: usize) -> Self {
        self.path_limit = path_limit;
        self
    }
}

/// Final answer for the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// A finite cheapest fare and the route achieving it.
    Cheapest { cost: i64, path: Vec<LocationId> },
    /// The destination cannot be reached from the source.
    Unreachable,
    /// A negative cycle can reach the destination, so fares are unbounded below.
    NoFiniteCheapest { example_cycle: Vec<LocationId> },
}

/// Cross-check of the shortest path cost against the enumerated paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub algorithm_cost: i64,
    pub enumerated_minimum: i64,
    pub matches: bool,
}

/// Planned route returned by the library.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub source: LocationId,
    pub destination: LocationId,
    pub graph: Graph,
    pub shortest: ShortestPathResult,
    pub ranked: RankedPaths,
    /// Enumeration stopped at the path limit with paths left unexplored.
    pub truncated: bool,
    pub outcome: RouteOutcome,
    pub verification: Option<Verification>,
}

impl RoutePlan {
    /// Whether no finite cheapest path exists because of a negative cycle.
    pub fn no_finite_cheapest(&self) -> bool {
        matches!(self.outcome, RouteOutcome::NoFiniteCheapest { .. })
    }

    pub fn cheapest_cost(&self) -> Option<i64> {
        match &self.outcome {
            RouteOutcome::Cheapest { cost, .. } => Some(*cost),
            _ => None,
        }
    }

    pub fn cheapest_path(&self) -> Option<&[LocationId]> {
        match &self.outcome {
            RouteOutcome::Cheapest { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Resolve source and destination input, rejecting equal endpoints.
pub fn resolve_endpoints(
    network: &Network,
    source: &str,
    destination: &str,
) -> Result<(LocationId, LocationId)> {
    let source_id = network.resolve(source)?;
    let destination_id = network.resolve(destination)?;
    if source_id == destination_id {
        return Err(Error::SameEndpoints { id: source_id });
    }
    Ok((source_id, destination_id))
}

/// Synthesize a demo graph for the request and plan a route over it.
///
/// This is the main entry point for route planning. It:
/// 1. Resolves the endpoints (the only hard failure besides bad options)
/// 2. Synthesizes a connected fare graph from the injected generator
/// 3. Runs the selected shortest path planner
/// 4. Enumerates and ranks simple paths
/// 5. Decides the outcome and cross-checks it
pub fn plan_route<R: Rng + ?Sized>(
    network: &Network,
    request: &RouteRequest,
    rng: &mut R,
) -> Result<RoutePlan> {
    let (source, destination) = resolve_endpoints(network, &request.source, &request.destination)?;
    let graph = synthesize(network, source, destination, &request.synthesis, rng)?;
    plan_on_graph(
        graph,
        source,
        destination,
        request.algorithm,
        request.path_limit,
    )
}

/// Plan a route over an existing graph.
pub fn plan_on_graph(
    graph: Graph,
    source: LocationId,
    destination: LocationId,
    algorithm: RouteAlgorithm,
    path_limit: usize,
) -> Result<RoutePlan> {
    for id in [source, destination] {
        if id >= graph.node_count() {
            return Err(Error::UnknownLocationId { id });
        }
    }
    if source == destination {
        return Err(Error::SameEndpoints { id: source });
    }

    let planner = select_planner(algorithm, &graph);
    let shortest = planner.shortest_paths(&graph, source)?;

    let enumeration = enumerate_simple_paths(&graph, source, destination, path_limit);
    let truncated = enumeration.truncated;
    let ranked = rank(enumeration.paths);

    let outcome = decide_outcome(&graph, &shortest, destination);
    let verification = verify(&outcome, &ranked);

    if let Some(check) = verification.filter(|check| !check.matches) {
        warn!(
            algorithm_cost = check.algorithm_cost,
            enumerated_minimum = check.enumerated_minimum,
            truncated,
            "shortest path cost differs from enumerated minimum"
        );
    }

    debug!(
        source,
        destination,
        algorithm = %algorithm,
        edges = graph.edge_count(),
        paths = ranked.len(),
        truncated,
        outcome = ?outcome,
        "planned route"
    );

    Ok(RoutePlan {
        source,
        destination,
        graph,
        shortest,
        ranked,
        truncated,
        outcome,
        verification,
    })
}

/// A negative cycle that can reach the destination wins over everything else.
/// A cycle elsewhere is flagged in the shortest path result but does not stop
/// the bounded-relaxation answer for the destination.
fn decide_outcome(
    graph: &Graph,
    shortest: &ShortestPathResult,
    destination: LocationId,
) -> RouteOutcome {
    if let Some(cycle) = &shortest.negative_cycle {
        if cycle.reaches(graph, destination) {
            return RouteOutcome::NoFiniteCheapest {
                example_cycle: cycle.example_cycle.clone(),
            };
        }
    }

    match (
        shortest.distance_to(destination),
        shortest.path_to(destination),
    ) {
        (Some(cost), Some(path)) => RouteOutcome::Cheapest { cost, path },
        (None, _) => RouteOutcome::Unreachable,
        (Some(_), None) => RouteOutcome::NoFiniteCheapest {
            example_cycle: shortest
                .negative_cycle
                .as_ref()
                .map(|cycle| cycle.example_cycle.clone())
                .unwrap_or_default(),
        },
    }
}

fn verify(outcome: &RouteOutcome, ranked: &RankedPaths) -> Option<Verification> {
    let RouteOutcome::Cheapest { cost, .. } = outcome else {
        return None;
    };
    let enumerated_minimum = ranked.cheapest()?.cost;
    Some(Verification {
        algorithm_cost: *cost,
        enumerated_minimum,
        matches: *cost == enumerated_minimum,
    })
}
