use serde::Serialize;
use tracing::debug;

use crate::graph::{round_tenth, Edge, Graph};
use crate::network::LocationId;

/// Default cap on enumerated paths per query.
pub const DEFAULT_PATH_LIMIT: usize = 2000;

/// A simple path from source to destination with its accumulated totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    pub nodes: Vec<LocationId>,
    pub cost: i64,
    /// Summed great-circle distance in kilometres, display only.
    pub distance: f64,
}

impl PathRecord {
    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Result of a bounded simple path search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enumeration {
    pub paths: Vec<PathRecord>,
    /// More simple paths exist than the limit allowed to collect.
    pub truncated: bool,
}

/// Enumerate simple paths from `source` to `destination`, at most `limit`.
///
/// Depth-first over an explicit stack in edge insertion order. A node already
/// on the current path is never revisited, which keeps every path simple and
/// bounds the search even when the graph has cycles. The search halts as soon
/// as `limit` paths are collected. [`Enumeration::truncated`] is then set when
/// any frame on the stack still had edges left to try, so it may be set even
/// if none of them would have led to the destination.
pub fn enumerate_simple_paths(
    graph: &Graph,
    source: LocationId,
    destination: LocationId,
    limit: usize,
) -> Enumeration {
    let node_count = graph.node_count();
    if source == destination || source >= node_count || destination >= node_count {
        return Enumeration::default();
    }

    let adjacency: Vec<Vec<&Edge>> = (0..node_count)
        .map(|node| graph.neighbours(node).collect())
        .collect();

    if limit == 0 {
        return Enumeration {
            paths: Vec::new(),
            truncated: !adjacency[source].is_empty(),
        };
    }

    let mut paths = Vec::new();
    let mut truncated = false;

    let mut on_path = vec![false; node_count];
    let mut path = vec![source];
    let mut costs = vec![0i64];
    let mut distances = vec![0.0f64];
    let mut cursors = vec![0usize];
    on_path[source] = true;

    while let Some(&cursor) = cursors.last() {
        let node = path[path.len() - 1];
        let Some(edge) = adjacency[node].get(cursor).copied() else {
            // Exhausted this node: backtrack.
            cursors.pop();
            path.pop();
            costs.pop();
            distances.pop();
            on_path[node] = false;
            continue;
        };
        if let Some(top) = cursors.last_mut() {
            *top += 1;
        }

        if on_path[edge.to] {
            continue;
        }

        let cost = costs[costs.len() - 1].saturating_add(edge.cost);
        let distance = distances[distances.len() - 1] + edge.distance;

        if edge.to == destination {
            let mut nodes = path.clone();
            nodes.push(destination);
            paths.push(PathRecord {
                nodes,
                cost,
                distance: round_tenth(distance),
            });
            if paths.len() == limit {
                truncated = path
                    .iter()
                    .zip(&cursors)
                    .any(|(&node, &cursor)| cursor < adjacency[node].len());
                break;
            }
            continue;
        }

        on_path[edge.to] = true;
        path.push(edge.to);
        costs.push(cost);
        distances.push(distance);
        cursors.push(0);
    }

    debug!(
        source,
        destination,
        found = paths.len(),
        truncated,
        "enumerated simple paths"
    );

    Enumeration { paths, truncated }
}
