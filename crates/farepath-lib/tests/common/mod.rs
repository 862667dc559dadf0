#![allow(dead_code)]

use std::path::PathBuf;

use farepath_lib::{Edge, Graph, Network};
use rand::{rngs::StdRng, SeedableRng};

pub const A: usize = 0;
pub const B: usize = 1;
pub const C: usize = 2;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn network() -> &'static Network {
    Network::builtin()
}

/// `A -> B -> C -> A` summing to -5.
pub fn negative_triangle() -> Graph {
    Graph::from_edges(
        3,
        [
            Edge::new(A, B, 10, 1.0),
            Edge::new(B, C, 10, 1.0),
            Edge::new(C, A, -25, 1.0),
        ],
    )
    .expect("valid triangle")
}

/// Two routes from `A` to `C`; the two-hop one is cheaper.
pub fn two_route_triangle() -> Graph {
    Graph::from_edges(
        3,
        [
            Edge::new(A, B, 5, 1.0),
            Edge::new(A, C, 20, 1.0),
            Edge::new(B, C, 5, 1.0),
        ],
    )
    .expect("valid triangle")
}
