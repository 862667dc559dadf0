//! Route command handler: synthesize or load a fare graph and plan over it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{debug, info};

use farepath_lib::{
    load_fare_table, plan_on_graph, plan_route, resolve_endpoints, RouteAlgorithm, RoutePlan,
    RouteRequest, RouteSummary, SynthesisOptions, DEFAULT_PATH_LIMIT,
};

use crate::config::RunConfig;
use crate::output::{render_route, OutputFormat};
use crate::terminal::ColorPalette;

/// Algorithm names accepted by `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Dijkstra without discounts, Bellman-Ford otherwise.
    #[default]
    Auto,
    BellmanFord,
    Dijkstra,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Auto => RouteAlgorithm::Auto,
            AlgorithmArg::BellmanFord => RouteAlgorithm::BellmanFord,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Source location name or id.
    pub from: String,
    /// Destination location name or id.
    pub to: String,
    pub algorithm: AlgorithmArg,
    /// Maximum number of simple paths to enumerate.
    pub limit: usize,
    pub min_out_degree: usize,
    pub max_out_degree: usize,
    pub max_edges: Option<usize>,
    /// Force a discounted direct edge.
    pub negative_edge: bool,
    /// Add a negative cycle through the source.
    pub negative_cycle: bool,
    /// Predefined fare table replacing synthesis.
    pub fares: Option<PathBuf>,
    /// Print every edge of the graph after the routes.
    pub show_edges: bool,
}

impl Default for RouteCommandArgs {
    fn default() -> Self {
        let synthesis = SynthesisOptions::default();
        Self {
            from: String::new(),
            to: String::new(),
            algorithm: AlgorithmArg::default(),
            limit: DEFAULT_PATH_LIMIT,
            min_out_degree: synthesis.min_out_degree,
            max_out_degree: synthesis.max_out_degree,
            max_edges: None,
            negative_edge: false,
            negative_cycle: false,
            fares: None,
            show_edges: false,
        }
    }
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let synthesis = SynthesisOptions {
            min_out_degree: self.min_out_degree,
            max_out_degree: self.max_out_degree,
            max_edges: self.max_edges,
            inject_negative_edge: self.negative_edge,
            inject_negative_cycle: self.negative_cycle,
            ..SynthesisOptions::default()
        };
        RouteRequest::new(self.from.clone(), self.to.clone())
            .with_algorithm(self.algorithm.into())
            .with_synthesis(synthesis)
            .with_path_limit(self.limit)
    }
}

/// Handle the route subcommand.
///
/// Plans over the fare table when one is given, otherwise over a graph
/// synthesized from the run's seed, then renders the result.
pub fn handle_route_command(
    config: &RunConfig,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let plan = plan(config, args)?;
    info!(
        seed = config.seed,
        edges = plan.graph.edge_count(),
        paths = plan.ranked.len(),
        "route planned"
    );

    let summary = RouteSummary::from_plan(&config.network, &plan)
        .context("failed to summarise the route")?;
    let seed = args.fares.is_none().then_some(config.seed);
    render_route(&summary, format, args.show_edges, seed, ColorPalette::detect())
        .context("failed to write route output")?;
    Ok(())
}

fn plan(config: &RunConfig, args: &RouteCommandArgs) -> Result<RoutePlan> {
    let request = args.to_request();

    if let Some(path) = &args.fares {
        let (source, destination) = resolve_endpoints(&config.network, &args.from, &args.to)?;
        let graph = load_fare_table(path, &config.network)
            .with_context(|| format!("failed to load fare table from {}", path.display()))?;
        debug!(path = %path.display(), edges = graph.edge_count(), "using fare table");
        return Ok(plan_on_graph(
            graph,
            source,
            destination,
            request.algorithm,
            request.path_limit,
        )?);
    }

    let mut rng = config.rng();
    Ok(plan_route(&config.network, &request, &mut rng)?)
}
