use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{LocationId, Network};
use crate::path::ShortestPathAlgorithm;
use crate::routing::{RouteOutcome, RoutePlan, Verification};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Location reference with its display name resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Endpoint {
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Endpoint {
    fn resolve(network: &Network, id: LocationId) -> Self {
        Self {
            id,
            name: network.name(id).map(str::to_string),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Edge of the planned graph, for visualisation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EdgeSummary {
    pub from: Endpoint,
    pub to: Endpoint,
    pub cost: i64,
    pub distance: f64,
}

/// One enumerated path in ranked order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedPathSummary {
    /// One-based position; rank 1 is the cheapest.
    pub rank: usize,
    pub nodes: Vec<LocationId>,
    pub names: Vec<String>,
    pub cost: i64,
    pub distance: f64,
}

/// Negative cycle diagnostics with names resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CycleSummary {
    pub affected: Vec<LocationId>,
    pub example_cycle: Vec<Endpoint>,
    pub reaches_destination: bool,
}

/// Structured representation of a planned route that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub source: Endpoint,
    pub destination: Endpoint,
    pub algorithm: ShortestPathAlgorithm,
    pub outcome: RouteOutcome,
    pub no_finite_cheapest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheapest_route: Option<Vec<Endpoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_cycle: Option<CycleSummary>,
    pub distance: Vec<Option<i64>>,
    pub predecessor: Vec<Option<LocationId>>,
    pub edges: Vec<EdgeSummary>,
    pub ranked_paths: Vec<RankedPathSummary>,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with resolved names.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Result<Self> {
        if plan.graph.node_count() > network.len() {
            return Err(Error::InvalidNetwork {
                message: format!(
                    "plan covers {} nodes but the network has {} locations",
                    plan.graph.node_count(),
                    network.len()
                ),
            });
        }

        let name_of = |id: LocationId| network.name(id).unwrap_or("<unknown>").to_string();
        let endpoints = |ids: &[LocationId]| {
            ids.iter()
                .map(|&id| Endpoint::resolve(network, id))
                .collect::<Vec<_>>()
        };

        let edges = plan
            .graph
            .edges()
            .iter()
            .map(|edge| EdgeSummary {
                from: Endpoint::resolve(network, edge.from),
                to: Endpoint::resolve(network, edge.to),
                cost: edge.cost,
                distance: edge.distance,
            })
            .collect();

        let ranked_paths = plan
            .ranked
            .iter()
            .enumerate()
            .map(|(index, path)| RankedPathSummary {
                rank: index + 1,
                nodes: path.nodes.clone(),
                names: path.nodes.iter().map(|&id| name_of(id)).collect(),
                cost: path.cost,
                distance: path.distance,
            })
            .collect();

        let negative_cycle = plan
            .shortest
            .negative_cycle
            .as_ref()
            .map(|cycle| CycleSummary {
                affected: cycle.affected.clone(),
                example_cycle: endpoints(&cycle.example_cycle),
                reaches_destination: plan.no_finite_cheapest(),
            });

        Ok(Self {
            source: Endpoint::resolve(network, plan.source),
            destination: Endpoint::resolve(network, plan.destination),
            algorithm: plan.shortest.algorithm,
            outcome: plan.outcome.clone(),
            no_finite_cheapest: plan.no_finite_cheapest(),
            cheapest_route: plan.cheapest_path().map(endpoints),
            negative_cycle,
            distance: plan.shortest.distance.clone(),
            predecessor: plan.shortest.predecessor.clone(),
            edges,
            ranked_paths,
            truncated: plan.truncated,
            verification: plan.verification,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    /// Cheapest fare when one exists.
    pub fn cheapest_cost(&self) -> Option<i64> {
        match self.outcome {
            RouteOutcome::Cheapest { cost, .. } => Some(cost),
            _ => None,
        }
    }

    fn headline(&self) -> String {
        match (&self.outcome, &self.cheapest_route) {
            (RouteOutcome::Cheapest { cost, .. }, Some(route)) => {
                format!("Cheapest fare {} via {}", cost, join_names(route))
            }
            (RouteOutcome::NoFiniteCheapest { .. }, _) => {
                let cycle = self
                    .negative_cycle
                    .as_ref()
                    .map(|cycle| cycle_names(&cycle.example_cycle))
                    .unwrap_or_default();
                if cycle.is_empty() {
                    "No finite cheapest path: a negative cycle reaches the destination".to_string()
                } else {
                    format!("No finite cheapest path: negative cycle {cycle} reaches the destination")
                }
            }
            _ => format!(
                "{} is unreachable from {}",
                self.destination.display_name(),
                self.source.display_name()
            ),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} to {} (algorithm: {})",
            self.source.display_name(),
            self.destination.display_name(),
            algorithm_label(self.algorithm)
        );
        let _ = writeln!(buffer, "{}", self.headline());

        if let Some(cycle) = self.negative_cycle.as_ref().filter(|c| !c.reaches_destination) {
            let _ = writeln!(
                buffer,
                "Warning: negative cycle {} detected; it does not reach the destination",
                cycle_names(&cycle.example_cycle)
            );
        }
        if let Some(check) = &self.verification {
            if check.matches {
                let _ = writeln!(buffer, "Verified against enumerated simple paths");
            } else {
                let _ = writeln!(
                    buffer,
                    "Enumerated minimum {} differs from algorithm cost {}",
                    check.enumerated_minimum, check.algorithm_cost
                );
            }
        }

        let _ = writeln!(
            buffer,
            "\nAvailable routes ({}{}):",
            self.ranked_paths.len(),
            if self.truncated { ", truncated" } else { "" }
        );
        if self.ranked_paths.is_empty() {
            let _ = writeln!(buffer, "  No paths found");
        }
        for path in &self.ranked_paths {
            let _ = writeln!(
                buffer,
                "{:>4}. {} | fare {} | {:.1} km",
                path.rank,
                path.names.join(" -> "),
                path.cost,
                path.distance
            );
        }

        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ (algorithm: `{}`)",
            self.source.display_name(),
            self.destination.display_name(),
            algorithm_label(self.algorithm)
        );
        let _ = writeln!(buffer, "> {}", self.headline());
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "| # | Path | Fare | Distance |");
        let _ = writeln!(buffer, "|---|------|------|----------|");
        for path in &self.ranked_paths {
            let _ = writeln!(
                buffer,
                "| {} | {} | {} | {:.1} km |",
                path.rank,
                path.names.join(" → "),
                path.cost,
                path.distance
            );
        }
        buffer
    }

    /// Render the graph's edges, discounts marked.
    pub fn render_edges(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Edges ({}):", self.edges.len());
        for edge in &self.edges {
            let _ = writeln!(
                buffer,
                "  {} -> {} : {}{} ({:.1} km)",
                edge.from.display_name(),
                edge.to.display_name(),
                edge.cost,
                if edge.cost < 0 { " [discount]" } else { "" },
                edge.distance
            );
        }
        buffer
    }
}

fn algorithm_label(algorithm: ShortestPathAlgorithm) -> &'static str {
    match algorithm {
        ShortestPathAlgorithm::BellmanFord => "bellman-ford",
        ShortestPathAlgorithm::Dijkstra => "dijkstra",
    }
}

fn join_names(endpoints: &[Endpoint]) -> String {
    endpoints
        .iter()
        .map(Endpoint::display_name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Cycle names closed back onto the first node.
fn cycle_names(cycle: &[Endpoint]) -> String {
    match cycle.first() {
        Some(first) => format!("{} -> {}", join_names(cycle), first.display_name()),
        None => String::new(),
    }
}
