use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{LocationId, Network};

/// Directed, priced connection between two locations.
///
/// `cost` is the fare and may be negative to model a discount. `distance` is
/// the great-circle length in kilometres and is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: LocationId,
    pub to: LocationId,
    pub cost: i64,
    pub distance: f64,
}

impl Edge {
    pub fn new(from: LocationId, to: LocationId, cost: i64, distance: f64) -> Self {
        Self {
            from,
            to,
            cost,
            distance,
        }
    }
}

/// Graph structure used by the path algorithms.
///
/// Nodes are the dense ids `0..node_count`. Edges keep their insertion order,
/// which is also the relaxation order of Bellman-Ford. At most one edge exists
/// per ordered `(from, to)` pair.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Create an edgeless graph over `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Build a graph from a list of edges, dropping later duplicates.
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = Edge>) -> Result<Self> {
        let mut graph = Self::new(node_count);
        for edge in edges {
            graph.push_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `node` in insertion order.
    pub fn neighbours(&self, node: LocationId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.edges[index])
    }

    /// The edge `from -> to`, if present.
    pub fn edge(&self, from: LocationId, to: LocationId) -> Option<&Edge> {
        self.neighbours(from).find(|edge| edge.to == to)
    }

    pub fn contains_edge(&self, from: LocationId, to: LocationId) -> bool {
        self.edge(from, to).is_some()
    }

    pub fn has_negative_edge(&self) -> bool {
        self.edges.iter().any(|edge| edge.cost < 0)
    }

    /// Append an edge.
    ///
    /// Returns `Ok(false)` without modifying the graph when an edge between the
    /// same ordered pair already exists.
    pub fn push_edge(&mut self, edge: Edge) -> Result<bool> {
        self.validate_endpoints(edge.from, edge.to)?;
        if self.contains_edge(edge.from, edge.to) {
            return Ok(false);
        }
        self.adjacency[edge.from].push(self.edges.len());
        self.edges.push(edge);
        Ok(true)
    }

    /// Set the fare of `from -> to`, inserting the edge when it is missing.
    pub fn set_cost(
        &mut self,
        from: LocationId,
        to: LocationId,
        cost: i64,
        distance: f64,
    ) -> Result<()> {
        self.validate_endpoints(from, to)?;
        let existing = self.adjacency[from]
            .iter()
            .copied()
            .find(|&index| self.edges[index].to == to);
        match existing {
            Some(index) => self.edges[index].cost = cost,
            None => {
                self.push_edge(Edge::new(from, to, cost, distance))?;
            }
        }
        Ok(())
    }

    /// Keep only the edges whose index is flagged in `keep`, preserving order.
    pub(crate) fn retain_indices(&mut self, keep: &[bool]) {
        let edges = std::mem::take(&mut self.edges);
        for list in &mut self.adjacency {
            list.clear();
        }
        for (index, edge) in edges.into_iter().enumerate() {
            if keep.get(index).copied().unwrap_or(false) {
                self.adjacency[edge.from].push(self.edges.len());
                self.edges.push(edge);
            }
        }
    }

    /// Whether `target` can be reached from `source` over directed edges.
    pub fn reachable(&self, source: LocationId, target: LocationId) -> bool {
        self.reachable_from_any(&[source], target)
    }

    /// Whether `target` can be reached from any of `sources`.
    pub fn reachable_from_any(&self, sources: &[LocationId], target: LocationId) -> bool {
        let mut seen = vec![false; self.node_count];
        let mut queue = VecDeque::new();
        for &source in sources {
            if source < self.node_count && !seen[source] {
                seen[source] = true;
                queue.push_back(source);
            }
        }

        while let Some(current) = queue.pop_front() {
            if current == target {
                return true;
            }
            for edge in self.neighbours(current) {
                if !seen[edge.to] {
                    seen[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        false
    }

    /// Fewest-hop path from `source` to `target` found by breadth-first search.
    pub fn bfs_path(&self, source: LocationId, target: LocationId) -> Option<Vec<LocationId>> {
        if source >= self.node_count || target >= self.node_count {
            return None;
        }
        if source == target {
            return Some(vec![source]);
        }

        let mut parents: Vec<Option<LocationId>> = vec![None; self.node_count];
        let mut seen = vec![false; self.node_count];
        let mut queue = VecDeque::new();

        seen[source] = true;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            for edge in self.neighbours(current) {
                let next = edge.to;
                if seen[next] {
                    continue;
                }
                seen[next] = true;
                parents[next] = Some(current);
                if next == target {
                    return Some(reconstruct_path(&parents, source, target));
                }
                queue.push_back(next);
            }
        }

        None
    }

    fn validate_endpoints(&self, from: LocationId, to: LocationId) -> Result<()> {
        if from >= self.node_count || to >= self.node_count {
            return Err(Error::InvalidEdge {
                from,
                to,
                reason: "endpoint is not a known location",
            });
        }
        if from == to {
            return Err(Error::InvalidEdge {
                from,
                to,
                reason: "self loops are not routes",
            });
        }
        Ok(())
    }
}

fn reconstruct_path(
    parents: &[Option<LocationId>],
    start: LocationId,
    goal: LocationId,
) -> Vec<LocationId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

/// Endpoint of a fare table row, given either as an id or a name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationRef {
    Id(LocationId),
    Name(String),
}

impl LocationRef {
    fn resolve(&self, network: &Network) -> Result<LocationId> {
        match self {
            LocationRef::Id(id) if *id < network.len() => Ok(*id),
            LocationRef::Id(id) => Err(Error::UnknownLocationId { id: *id }),
            LocationRef::Name(name) => network.resolve(name),
        }
    }
}

/// One row of a predefined fare table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FareEntry {
    pub from: LocationRef,
    pub to: LocationRef,
    pub cost: i64,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Build a graph from predefined fare table rows.
///
/// Missing distances are filled in from the network's coordinates. When a pair
/// appears more than once the first row wins.
pub fn graph_from_fare_table(network: &Network, entries: &[FareEntry]) -> Result<Graph> {
    let mut graph = Graph::new(network.len());
    let mut dropped = 0usize;

    for entry in entries {
        let from = entry.from.resolve(network)?;
        let to = entry.to.resolve(network)?;
        let distance = match entry.distance {
            Some(distance) => distance,
            None => round_tenth(network.distance_km(from, to).unwrap_or_default()),
        };
        if !graph.push_edge(Edge::new(from, to, entry.cost, distance))? {
            dropped += 1;
        }
    }

    debug!(
        edges = graph.edge_count(),
        dropped, "built graph from fare table"
    );
    Ok(graph)
}

/// Load a fare table from a JSON file.
pub fn load_fare_table(path: &Path, network: &Network) -> Result<Graph> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<FareEntry> = serde_json::from_str(&raw)?;
    graph_from_fare_table(network, &entries)
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
