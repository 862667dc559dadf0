//! Farepath library entry points.
//!
//! This crate synthesizes fare graphs over a location network, runs shortest
//! path algorithms that tolerate discounted (negative) fares, enumerates and
//! ranks simple paths, and decides when no finite cheapest fare exists.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod enumerate;
pub mod error;
pub mod geo;
pub mod graph;
pub mod network;
pub mod output;
pub mod path;
pub mod rank;
pub mod routing;
pub mod synth;

pub use enumerate::{enumerate_simple_paths, Enumeration, PathRecord, DEFAULT_PATH_LIMIT};
pub use error::{Error, Result};
pub use geo::{haversine_km, Coordinates};
pub use graph::{graph_from_fare_table, load_fare_table, Edge, FareEntry, Graph, LocationRef};
pub use network::{Location, LocationId, Network};
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{
    bellman_ford, bellman_ford_traced, dijkstra, NegativeCycle, ShortestPathAlgorithm,
    ShortestPathResult,
};
pub use rank::{rank, RankedPaths};
pub use routing::{
    plan_on_graph, plan_route, resolve_endpoints, RouteAlgorithm, RouteOutcome, RoutePlan,
    RouteRequest, Verification,
};
pub use synth::{synthesize, SynthesisOptions};
