use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use farepath_cli::commands::locations::handle_locations_command;
use farepath_cli::commands::route::{handle_route_command, AlgorithmArg, RouteCommandArgs};
use farepath_cli::config::RunConfig;
use farepath_cli::output::OutputFormat;
use farepath_lib::DEFAULT_PATH_LIMIT;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cheapest fares over graphs with discounts")]
struct Cli {
    /// Seed for graph synthesis; a random seed is used and logged when absent.
    #[arg(long, global = true, env = "FAREPATH_SEED")]
    seed: Option<u64>,

    /// JSON file of locations to use instead of the built-in airports.
    #[arg(long, global = true, env = "FAREPATH_NETWORK")]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the locations routes can be planned between.
    Locations,
    /// Plan the cheapest fare between two locations.
    Route(RouteArgs),
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Source location name or id.
    #[arg(long = "from")]
    from: String,
    /// Destination location name or id.
    #[arg(long = "to")]
    to: String,
    /// Shortest path algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Auto)]
    algorithm: AlgorithmArg,
    /// Maximum number of simple paths to enumerate.
    #[arg(long, default_value_t = DEFAULT_PATH_LIMIT)]
    limit: usize,
    /// Fewest outgoing edges per location when synthesizing.
    #[arg(long, default_value_t = 3)]
    min_out: usize,
    /// Most outgoing edges per location when synthesizing.
    #[arg(long, default_value_t = 5)]
    max_out: usize,
    /// Cap on the synthesized edge count.
    #[arg(long)]
    max_edges: Option<usize>,
    /// Add a discounted direct edge from source to destination.
    #[arg(long)]
    negative_edge: bool,
    /// Add a negative cycle through the source.
    #[arg(long)]
    negative_cycle: bool,
    /// Plan over a JSON fare table instead of a synthesized graph.
    #[arg(long, conflicts_with_all = ["negative_edge", "negative_cycle", "max_edges"])]
    fares: Option<PathBuf>,
    /// Also print every edge of the graph.
    #[arg(long)]
    show_edges: bool,
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            algorithm: args.algorithm,
            limit: args.limit,
            min_out_degree: args.min_out,
            max_out_degree: args.max_out,
            max_edges: args.max_edges,
            negative_edge: args.negative_edge,
            negative_cycle: args.negative_cycle,
            fares: args.fares,
            show_edges: args.show_edges,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = RunConfig::load(cli.seed, cli.network.as_deref())?;

    match cli.command {
        Command::Locations => handle_locations_command(&config, cli.format),
        Command::Route(args) => handle_route_command(&config, &args.into(), cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
