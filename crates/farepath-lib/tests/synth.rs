mod common;

use common::{network, seeded};
use farepath_lib::{bellman_ford, synthesize, Error, SynthesisOptions};

#[test]
fn destination_is_always_reachable() {
    let options = SynthesisOptions {
        min_out_degree: 0,
        max_out_degree: 1,
        ..SynthesisOptions::default()
    };
    let len = network().len();

    for seed in 0..40 {
        let source = (seed as usize * 7) % len;
        let destination = (source + 1 + seed as usize % (len - 1)) % len;
        let mut rng = seeded(seed);
        let graph = synthesize(network(), source, destination, &options, &mut rng).unwrap();
        assert!(
            graph.reachable(source, destination),
            "seed {seed}: {source} -> {destination}"
        );
    }
}

#[test]
fn same_seed_same_graph() {
    let options = SynthesisOptions::default();
    let first = synthesize(network(), 0, 4, &options, &mut seeded(99)).unwrap();
    let second = synthesize(network(), 0, 4, &options, &mut seeded(99)).unwrap();
    assert_eq!(first.edges(), second.edges());
}

#[test]
fn out_degree_stays_within_bounds_before_repair() {
    let options = SynthesisOptions {
        min_out_degree: 2,
        max_out_degree: 2,
        ..SynthesisOptions::default()
    };
    let graph = synthesize(network(), 0, 4, &options, &mut seeded(5)).unwrap();
    for node in 0..graph.node_count() {
        let degree = graph.neighbours(node).count();
        // The repair chain may add one extra edge per node it touches.
        assert!((2..=3).contains(&degree), "node {node} has {degree} edges");
    }
}

#[test]
fn no_self_loops_or_duplicates() {
    let graph = synthesize(network(), 3, 8, &SynthesisOptions::default(), &mut seeded(1)).unwrap();
    let mut pairs: Vec<_> = graph.edges().iter().map(|e| (e.from, e.to)).collect();
    assert!(pairs.iter().all(|(from, to)| from != to));
    let total = pairs.len();
    pairs.sort_unstable();
    pairs.dedup();
    assert_eq!(pairs.len(), total);
}

#[test]
fn negative_edge_is_injected_on_direct_pair() {
    let options = SynthesisOptions {
        inject_negative_edge: true,
        ..SynthesisOptions::default()
    };
    let graph = synthesize(network(), 0, 4, &options, &mut seeded(3)).unwrap();
    let edge = graph.edge(0, 4).expect("direct edge present");
    assert_eq!(edge.cost, -180);
    assert!(graph.has_negative_edge());
}

#[test]
fn injected_cycle_is_detected_from_source() {
    let options = SynthesisOptions {
        inject_negative_cycle: true,
        ..SynthesisOptions::default()
    };
    for seed in 0..10 {
        let graph = synthesize(network(), 0, 4, &options, &mut seeded(seed)).unwrap();
        let result = bellman_ford(&graph, 0);
        let cycle = result.negative_cycle.expect("negative cycle detected");
        assert!(cycle.reaches(&graph, 4), "seed {seed}");
    }
}

#[test]
fn edge_cap_is_respected_and_keeps_connectivity() {
    let options = SynthesisOptions {
        max_edges: Some(12),
        ..SynthesisOptions::default()
    };
    for seed in 0..20 {
        let graph = synthesize(network(), 2, 17, &options, &mut seeded(seed)).unwrap();
        assert!(graph.edge_count() <= 12, "seed {seed}");
        assert!(graph.reachable(2, 17), "seed {seed}");
    }
}

#[test]
fn invalid_endpoints_are_rejected() {
    let options = SynthesisOptions::default();
    let error = synthesize(network(), 0, 0, &options, &mut seeded(0)).unwrap_err();
    assert!(matches!(error, Error::SameEndpoints { id: 0 }));

    let error = synthesize(network(), 0, 500, &options, &mut seeded(0)).unwrap_err();
    assert!(matches!(error, Error::UnknownLocationId { id: 500 }));
}

#[test]
fn invalid_options_are_rejected() {
    let options = SynthesisOptions {
        fare_per_km: 0.0,
        ..SynthesisOptions::default()
    };
    let error = synthesize(network(), 0, 1, &options, &mut seeded(0)).unwrap_err();
    assert!(matches!(error, Error::InvalidSynthesisOptions { .. }));
}
