//! Demo graph synthesis.
//!
//! Builds a random set of priced, directed edges over a [`Network`] such that
//! the destination is always reachable from the source. All randomness comes
//! from the caller-supplied generator, so a seeded generator yields the same
//! graph every time.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{round_tenth, Edge, Graph};
use crate::network::{LocationId, Network};

/// Fare of the demo discount injected on the direct source to destination edge.
pub const DEMO_NEGATIVE_EDGE_FARE: i64 = -180;

/// Fares around the injected demo cycle `source -> a -> b -> source`.
pub const DEMO_NEGATIVE_CYCLE_FARES: [i64; 3] = [-120, -130, -40];

/// Longest guaranteed path appended when the random edges leave the
/// destination unreachable.
const MAX_REPAIR_HOPS: usize = 3;

/// Knobs for [`synthesize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisOptions {
    /// Fewest outgoing edges drawn per location.
    pub min_out_degree: usize,
    /// Most outgoing edges drawn per location.
    pub max_out_degree: usize,
    /// Cap on the total edge count after repair and injection.
    pub max_edges: Option<usize>,
    /// Fare charged per great-circle kilometre before perturbation.
    pub fare_per_km: f64,
    /// Relative fare perturbation, drawn uniformly from `[-jitter, jitter]`.
    pub fare_jitter: f64,
    /// Chance that a generated edge becomes a discount (negative fare).
    pub discount_probability: f64,
    /// Force a discounted direct edge from source to destination.
    pub inject_negative_edge: bool,
    /// Add a three-node negative cycle through the source.
    pub inject_negative_cycle: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            min_out_degree: 3,
            max_out_degree: 5,
            max_edges: None,
            fare_per_km: 6.0,
            fare_jitter: 0.12,
            discount_probability: 0.03,
            inject_negative_edge: false,
            inject_negative_cycle: false,
        }
    }
}

impl SynthesisOptions {
    /// Reject option combinations that cannot produce a sensible graph.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidSynthesisOptions { message });

        if self.max_out_degree == 0 {
            return invalid("max_out_degree must be at least 1".to_string());
        }
        if self.min_out_degree > self.max_out_degree {
            return invalid(format!(
                "min_out_degree {} exceeds max_out_degree {}",
                self.min_out_degree, self.max_out_degree
            ));
        }
        if !(self.fare_per_km.is_finite() && self.fare_per_km > 0.0) {
            return invalid(format!("fare_per_km must be positive, got {}", self.fare_per_km));
        }
        if !(0.0..1.0).contains(&self.fare_jitter) {
            return invalid(format!("fare_jitter must be in [0, 1), got {}", self.fare_jitter));
        }
        if !(0.0..=1.0).contains(&self.discount_probability) {
            return invalid(format!(
                "discount_probability must be in [0, 1], got {}",
                self.discount_probability
            ));
        }
        Ok(())
    }
}

/// Synthesize a demo graph in which `destination` is reachable from `source`.
///
/// Only invalid endpoints or options are errors. Once the inputs are valid the
/// generator repairs its own output, so the connectivity guarantee always holds.
pub fn synthesize<R: Rng + ?Sized>(
    network: &Network,
    source: LocationId,
    destination: LocationId,
    options: &SynthesisOptions,
    rng: &mut R,
) -> Result<Graph> {
    options.validate()?;
    validate_endpoints(network, source, destination)?;

    let node_count = network.len();
    let mut graph = Graph::new(node_count);

    // Random fan-out per location. Duplicate pairs are dropped by the graph.
    for from in 0..node_count {
        let others = node_count - 1;
        let fan_out = rng
            .gen_range(options.min_out_degree..=options.max_out_degree)
            .min(others);
        for offset in index::sample(rng, others, fan_out) {
            let to = if offset >= from { offset + 1 } else { offset };
            let (cost, distance) = priced_hop(network, from, to, options, rng);
            graph.push_edge(Edge::new(from, to, cost, distance))?;
        }
    }
    let generated = graph.edge_count();

    let mut repaired = false;
    if !graph.reachable(source, destination) {
        append_guaranteed_path(network, &mut graph, source, destination, options, rng)?;
        repaired = true;
    }

    if options.inject_negative_edge {
        let distance = hop_distance(network, source, destination);
        graph.set_cost(source, destination, DEMO_NEGATIVE_EDGE_FARE, distance)?;
    }

    let cycle = if options.inject_negative_cycle {
        inject_negative_cycle(network, &mut graph, source, destination, rng)?
    } else {
        Vec::new()
    };

    if let Some(cap) = options.max_edges {
        cap_edges(&mut graph, source, destination, &cycle, cap, rng);
    }

    debug_assert!(graph.reachable(source, destination));
    debug!(
        source,
        destination,
        generated,
        edges = graph.edge_count(),
        repaired,
        negative_cycle = !cycle.is_empty(),
        "synthesized fare graph"
    );

    Ok(graph)
}

fn validate_endpoints(network: &Network, source: LocationId, destination: LocationId) -> Result<()> {
    for id in [source, destination] {
        if id >= network.len() {
            return Err(Error::UnknownLocationId { id });
        }
    }
    if source == destination {
        return Err(Error::SameEndpoints { id: source });
    }
    Ok(())
}

fn hop_distance(network: &Network, from: LocationId, to: LocationId) -> f64 {
    round_tenth(network.distance_km(from, to).unwrap_or_default())
}

/// Distance-derived fare for one hop, perturbed and occasionally discounted.
fn priced_hop<R: Rng + ?Sized>(
    network: &Network,
    from: LocationId,
    to: LocationId,
    options: &SynthesisOptions,
    rng: &mut R,
) -> (i64, f64) {
    let distance = network.distance_km(from, to).unwrap_or_default();
    let base = distance * options.fare_per_km;
    let jitter = rng.gen_range(-options.fare_jitter..=options.fare_jitter);
    let mut fare = (base * (1.0 + jitter)).round() as i64;

    if rng.gen_bool(options.discount_probability) {
        let share = rng.gen_range(0.02..=0.08);
        fare = -((fare as f64 * share).round() as i64).max(1);
    }

    (fare, round_tenth(distance))
}

/// Chain of 1 to 3 hops from source to destination through random
/// intermediates.
fn append_guaranteed_path<R: Rng + ?Sized>(
    network: &Network,
    graph: &mut Graph,
    source: LocationId,
    destination: LocationId,
    options: &SynthesisOptions,
    rng: &mut R,
) -> Result<()> {
    let pool = intermediates(network.len(), source, destination);
    let hops = rng.gen_range(1..=MAX_REPAIR_HOPS).min(pool.len() + 1);

    let mut chain = Vec::with_capacity(hops + 1);
    chain.push(source);
    chain.extend(index::sample(rng, pool.len(), hops - 1).into_iter().map(|i| pool[i]));
    chain.push(destination);

    for pair in chain.windows(2) {
        let (cost, distance) = priced_hop(network, pair[0], pair[1], options, rng);
        graph.push_edge(Edge::new(pair[0], pair[1], cost, distance))?;
    }

    debug!(?chain, "appended guaranteed path");
    Ok(())
}

/// Returns the injected cycle as its three nodes, or empty when the network is
/// too small to host one.
fn inject_negative_cycle<R: Rng + ?Sized>(
    network: &Network,
    graph: &mut Graph,
    source: LocationId,
    destination: LocationId,
    rng: &mut R,
) -> Result<Vec<LocationId>> {
    let pool = intermediates(network.len(), source, destination);
    if pool.len() < 2 {
        debug!("network too small for a demo negative cycle");
        return Ok(Vec::new());
    }

    let picked = index::sample(rng, pool.len(), 2);
    let cycle = vec![source, pool[picked.index(0)], pool[picked.index(1)]];

    for (position, fare) in DEMO_NEGATIVE_CYCLE_FARES.iter().enumerate() {
        let from = cycle[position];
        let to = cycle[(position + 1) % cycle.len()];
        graph.set_cost(from, to, *fare, hop_distance(network, from, to))?;
    }

    Ok(cycle)
}

/// Trim to `cap` edges while keeping the direct edge, one connecting path and
/// the injected cycle.
fn cap_edges<R: Rng + ?Sized>(
    graph: &mut Graph,
    source: LocationId,
    destination: LocationId,
    cycle: &[LocationId],
    cap: usize,
    rng: &mut R,
) {
    if graph.edge_count() <= cap {
        return;
    }

    let mut protected_pairs = vec![(source, destination)];
    if let Some(path) = graph.bfs_path(source, destination) {
        protected_pairs.extend(path.windows(2).map(|pair| (pair[0], pair[1])));
    }
    for position in 0..cycle.len() {
        protected_pairs.push((cycle[position], cycle[(position + 1) % cycle.len()]));
    }

    let mut keep = vec![false; graph.edge_count()];
    let mut others = Vec::new();
    for (index, edge) in graph.edges().iter().enumerate() {
        if protected_pairs.contains(&(edge.from, edge.to)) {
            keep[index] = true;
        } else {
            others.push(index);
        }
    }

    let protected = keep.iter().filter(|kept| **kept).count();
    others.shuffle(rng);
    for index in others.into_iter().take(cap.saturating_sub(protected)) {
        keep[index] = true;
    }

    graph.retain_indices(&keep);
}

fn intermediates(node_count: usize, source: LocationId, destination: LocationId) -> Vec<LocationId> {
    (0..node_count)
        .filter(|&id| id != source && id != destination)
        .collect()
}
