use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::network::LocationId;

/// Shortest path algorithm that produced a [`ShortestPathResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortestPathAlgorithm {
    BellmanFord,
    Dijkstra,
}

/// Diagnostics for a negative cycle reachable from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeCycle {
    /// Nodes that could still be relaxed after `|V| - 1` rounds, ascending.
    pub affected: Vec<LocationId>,
    /// One offending cycle in travel order, best-effort (may be empty).
    pub example_cycle: Vec<LocationId>,
}

impl NegativeCycle {
    /// Whether the cycle's influence extends to `target`.
    ///
    /// When it does, no finite cheapest path to `target` exists.
    pub fn reaches(&self, graph: &Graph, target: LocationId) -> bool {
        graph.reachable_from_any(&self.affected, target)
    }
}

/// Distances and predecessor links from a single source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathResult {
    pub source: LocationId,
    pub algorithm: ShortestPathAlgorithm,
    /// Minimum cost per node, `None` when unreached.
    pub distance: Vec<Option<i64>>,
    pub predecessor: Vec<Option<LocationId>>,
    /// Relaxation rounds actually performed.
    pub rounds: usize,
    pub negative_cycle: Option<NegativeCycle>,
}

impl ShortestPathResult {
    pub fn has_negative_cycle(&self) -> bool {
        self.negative_cycle.is_some()
    }

    pub fn distance_to(&self, target: LocationId) -> Option<i64> {
        self.distance.get(target).copied().flatten()
    }

    /// Follow predecessor links back from `target`.
    ///
    /// Returns `None` when `target` is unreached or the chain does not lead
    /// back to the source within `|V|` steps (a negative cycle disturbed it).
    pub fn path_to(&self, target: LocationId) -> Option<Vec<LocationId>> {
        self.distance_to(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            if path.len() > self.distance.len() {
                return None;
            }
            current = self.predecessor.get(current).copied().flatten()?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Run Bellman-Ford from `source`.
///
/// Tolerates negative fares and reports a reachable negative cycle through
/// [`ShortestPathResult::negative_cycle`] rather than failing.
pub fn bellman_ford(graph: &Graph, source: LocationId) -> ShortestPathResult {
    bellman_ford_traced(graph, source, |_, _| {})
}

/// Bellman-Ford with an observer that sees the distances after every round.
pub fn bellman_ford_traced<F>(graph: &Graph, source: LocationId, mut observe: F) -> ShortestPathResult
where
    F: FnMut(usize, &[Option<i64>]),
{
    let node_count = graph.node_count();
    let mut distance: Vec<Option<i64>> = vec![None; node_count];
    let mut predecessor: Vec<Option<LocationId>> = vec![None; node_count];
    if source < node_count {
        distance[source] = Some(0);
    }

    let mut rounds = 0;
    for round in 1..node_count {
        let mut relaxed = false;
        for edge in graph.edges() {
            let Some(candidate) = relaxed_distance(&distance, edge.from, edge.cost) else {
                continue;
            };
            if improves(candidate, distance[edge.to]) {
                distance[edge.to] = Some(candidate);
                predecessor[edge.to] = Some(edge.from);
                relaxed = true;
            }
        }
        rounds = round;
        observe(round, &distance);

        // Nothing improved, so later rounds cannot improve either.
        if !relaxed {
            break;
        }
    }

    let mut affected: Vec<LocationId> = graph
        .edges()
        .iter()
        .filter(|edge| {
            relaxed_distance(&distance, edge.from, edge.cost)
                .is_some_and(|candidate| improves(candidate, distance[edge.to]))
        })
        .map(|edge| edge.to)
        .collect();
    affected.sort_unstable();
    affected.dedup();

    let negative_cycle = if affected.is_empty() {
        None
    } else {
        let example_cycle = trace_cycle(&predecessor, affected[0]);
        Some(NegativeCycle {
            affected,
            example_cycle,
        })
    };

    debug!(
        source,
        rounds,
        negative_cycle = negative_cycle.is_some(),
        "bellman-ford finished"
    );

    ShortestPathResult {
        source,
        algorithm: ShortestPathAlgorithm::BellmanFord,
        distance,
        predecessor,
        rounds,
        negative_cycle,
    }
}

fn relaxed_distance(distance: &[Option<i64>], from: LocationId, cost: i64) -> Option<i64> {
    distance[from].map(|base| base.saturating_add(cost))
}

fn improves(candidate: i64, current: Option<i64>) -> bool {
    current.map_or(true, |current| candidate < current)
}

/// Walk predecessor links from an affected node until a node repeats.
fn trace_cycle(predecessor: &[Option<LocationId>], start: LocationId) -> Vec<LocationId> {
    // |V| steps back is guaranteed to land on the cycle itself.
    let mut current = start;
    for _ in 0..predecessor.len() {
        match predecessor[current] {
            Some(previous) => current = previous,
            None => return Vec::new(),
        }
    }

    let anchor = current;
    let mut cycle = vec![anchor];
    loop {
        let Some(previous) = predecessor[current] else {
            return Vec::new();
        };
        if previous == anchor {
            break;
        }
        if cycle.len() > predecessor.len() {
            return Vec::new();
        }
        cycle.push(previous);
        current = previous;
    }

    // Collected backwards along predecessor links; put the anchor first again.
    cycle.reverse();
    cycle.rotate_right(1);
    cycle
}

/// Run Dijkstra's algorithm from `source`.
///
/// Faster than Bellman-Ford but only valid without discounts, so any negative
/// fare is rejected up front.
pub fn dijkstra(graph: &Graph, source: LocationId) -> Result<ShortestPathResult> {
    if let Some(edge) = graph.edges().iter().find(|edge| edge.cost < 0) {
        return Err(Error::NegativeFare {
            from: edge.from,
            to: edge.to,
            cost: edge.cost,
        });
    }

    let node_count = graph.node_count();
    let mut distance: Vec<Option<i64>> = vec![None; node_count];
    let mut predecessor: Vec<Option<LocationId>> = vec![None; node_count];
    let mut queue = BinaryHeap::new();
    let mut settled = 0usize;

    if source < node_count {
        distance[source] = Some(0);
        queue.push(QueueEntry::new(source, 0));
    }

    while let Some(entry) = queue.pop() {
        if distance[entry.node].is_some_and(|best| best < entry.cost) {
            continue;
        }
        settled += 1;

        for edge in graph.neighbours(entry.node) {
            let next_cost = entry.cost.saturating_add(edge.cost);
            if improves(next_cost, distance[edge.to]) {
                distance[edge.to] = Some(next_cost);
                predecessor[edge.to] = Some(entry.node);
                queue.push(QueueEntry::new(edge.to, next_cost));
            }
        }
    }

    debug!(source, settled, "dijkstra finished");

    Ok(ShortestPathResult {
        source,
        algorithm: ShortestPathAlgorithm::Dijkstra,
        distance,
        predecessor,
        rounds: settled,
        negative_cycle: None,
    })
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: i64,
}

impl QueueEntry {
    fn new(node: LocationId, cost: i64) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph(node_count: usize, edges: &[(LocationId, LocationId, i64)]) -> Graph {
        Graph::from_edges(
            node_count,
            edges
                .iter()
                .map(|&(from, to, cost)| Edge::new(from, to, cost, 0.0)),
        )
        .unwrap()
    }

    #[test]
    fn trace_cycle_returns_loop_in_travel_order() {
        // 0 -> 1 -> 2 -> 3 -> 1
        let predecessor = vec![None, Some(3), Some(1), Some(2)];
        assert_eq!(trace_cycle(&predecessor, 2), vec![1, 2, 3]);
    }

    #[test]
    fn trace_cycle_gives_up_on_broken_chain() {
        let predecessor = vec![None, Some(0), Some(1)];
        assert!(trace_cycle(&predecessor, 2).is_empty());
    }

    #[test]
    fn early_exit_after_quiet_round() {
        let graph = graph(5, &[(0, 1, 1), (1, 2, 1)]);
        let result = bellman_ford(&graph, 0);
        assert_eq!(result.rounds, 2);
        assert_eq!(result.distance_to(2), Some(2));
        assert_eq!(result.distance_to(4), None);
    }

    #[test]
    fn path_to_unreached_is_none() {
        let graph = graph(3, &[(0, 1, 4)]);
        let result = bellman_ford(&graph, 0);
        assert_eq!(result.path_to(1), Some(vec![0, 1]));
        assert_eq!(result.path_to(2), None);
        assert_eq!(result.path_to(0), Some(vec![0]));
    }

    #[test]
    fn dijkstra_rejects_discounts() {
        let graph = graph(2, &[(0, 1, -1)]);
        assert!(matches!(
            dijkstra(&graph, 0),
            Err(Error::NegativeFare { from: 0, to: 1, cost: -1 })
        ));
    }

    #[test]
    fn extreme_fares_saturate_in_both_engines() {
        let graph = graph(3, &[(0, 1, i64::MAX), (1, 2, 1)]);
        let expected = Some(i64::MAX);
        assert_eq!(bellman_ford(&graph, 0).distance_to(2), expected);
        assert_eq!(dijkstra(&graph, 0).unwrap().distance_to(2), expected);
    }

    #[test]
    fn queue_entry_orders_as_min_heap() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new(1, 30));
        heap.push(QueueEntry::new(2, 10));
        heap.push(QueueEntry::new(3, 20));
        assert_eq!(heap.pop().map(|entry| entry.node), Some(2));
    }
}
