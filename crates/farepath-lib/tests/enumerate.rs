mod common;

use std::time::{Duration, Instant};

use common::{negative_triangle, network, seeded, two_route_triangle, A, B, C};
use farepath_lib::{enumerate_simple_paths, rank, synthesize, Edge, Graph, SynthesisOptions};

#[test]
fn triangle_yields_two_paths_ranked_cheapest_first() {
    let enumeration = enumerate_simple_paths(&two_route_triangle(), A, C, 10);
    assert_eq!(enumeration.paths.len(), 2);
    assert!(!enumeration.truncated);

    let ranked = rank(enumeration.paths);
    let summary: Vec<_> = ranked.iter().map(|p| (p.nodes.clone(), p.cost)).collect();
    assert_eq!(summary, vec![(vec![A, B, C], 10), (vec![A, C], 20)]);
}

#[test]
fn cycles_do_not_trap_the_search() {
    let enumeration = enumerate_simple_paths(&negative_triangle(), A, C, 10);
    let nodes: Vec<_> = enumeration.paths.iter().map(|p| p.nodes.clone()).collect();
    assert_eq!(nodes, vec![vec![A, B, C]]);
    assert_eq!(enumeration.paths[0].cost, 20);
}

#[test]
fn every_path_is_simple_and_well_formed() {
    let graph = synthesize(network(), 0, 4, &SynthesisOptions::default(), &mut seeded(21)).unwrap();
    let enumeration = enumerate_simple_paths(&graph, 0, 4, 500);
    assert!(!enumeration.paths.is_empty());

    for path in &enumeration.paths {
        assert_eq!(path.nodes.first(), Some(&0));
        assert_eq!(path.nodes.last(), Some(&4));
        let mut sorted = path.nodes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), path.nodes.len(), "repeated node in {:?}", path.nodes);

        let cost: i64 = path
            .nodes
            .windows(2)
            .map(|pair| graph.edge(pair[0], pair[1]).expect("edge exists").cost)
            .sum();
        assert_eq!(cost, path.cost);
        assert_eq!(path.hop_count(), path.nodes.len() - 1);
    }
}

#[test]
fn limit_bounds_the_result_and_flags_truncation() {
    let graph = synthesize(network(), 0, 4, &SynthesisOptions::default(), &mut seeded(21)).unwrap();
    let enumeration = enumerate_simple_paths(&graph, 0, 4, 5);
    assert_eq!(enumeration.paths.len(), 5);
    assert!(enumeration.truncated);
}

#[test]
fn zero_limit_only_reports_truncation() {
    let enumeration = enumerate_simple_paths(&two_route_triangle(), A, C, 0);
    assert!(enumeration.paths.is_empty());
    assert!(enumeration.truncated);
}

#[test]
fn unreachable_destination_yields_nothing() {
    let enumeration = enumerate_simple_paths(&two_route_triangle(), C, A, 10);
    assert!(enumeration.paths.is_empty());
    assert!(!enumeration.truncated);
}

#[test]
fn search_stops_at_limit_despite_dense_dead_ends() {
    // The first edge reaches the destination; after it sits a complete
    // digraph on 1..=10 with no way out, worth millions of simple paths.
    let destination = 11;
    let mut edges = vec![Edge::new(0, destination, 1, 1.0)];
    edges.extend((1..=10).map(|to| Edge::new(0, to, 1, 1.0)));
    for from in 1..=10 {
        for to in 1..=10 {
            if from != to {
                edges.push(Edge::new(from, to, 1, 1.0));
            }
        }
    }
    let graph = Graph::from_edges(12, edges).unwrap();

    let started = Instant::now();
    let enumeration = enumerate_simple_paths(&graph, 0, destination, 1);

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(enumeration.paths.len(), 1);
    assert_eq!(enumeration.paths[0].nodes, vec![0, destination]);
    assert!(enumeration.truncated);
}

#[test]
fn extreme_fares_do_not_overflow() {
    let graph = Graph::from_edges(3, [Edge::new(0, 1, i64::MAX, 1.0), Edge::new(1, 2, 1, 1.0)])
        .unwrap();
    let enumeration = enumerate_simple_paths(&graph, 0, 2, 10);
    assert_eq!(enumeration.paths.len(), 1);
    assert_eq!(enumeration.paths[0].cost, i64::MAX);
}
