//! Output formatting for route rendering.
//!
//! Renderers write a [`RouteSummary`] to stdout in one of the supported
//! [`OutputFormat`]s. Library types stay presentation-agnostic; colours and
//! layout live here.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use farepath_lib::{Location, RouteOutcome, RouteRenderMode, RouteSummary};
use serde::Serialize;

use crate::terminal::{format_fare, ColorPalette};

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly listing with colours when the terminal allows.
    #[default]
    Text,
    /// Markdown-flavoured table.
    Rich,
    /// Pretty-printed JSON for scripting.
    Json,
    /// Just the cheapest route, one location per line.
    Basic,
}

/// Render a route summary in the requested format.
///
/// `seed` is the synthesis seed, `None` for fare-table runs. It is appended
/// to the textual formats and carried as a top-level field in JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_route(
    summary: &RouteSummary,
    format: OutputFormat,
    show_edges: bool,
    seed: Option<u64>,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => return render_json(summary, seed),
        OutputFormat::Text => print!("{}", render_text(summary, palette)),
        OutputFormat::Rich => print!("{}", summary.render(RouteRenderMode::RichText)),
        OutputFormat::Basic => print!("{}", render_basic(summary)),
    }
    if show_edges {
        print!("\n{}", summary.render_edges());
    }
    if let Some(seed) = seed {
        println!("\nSeed: {seed}");
    }
    Ok(())
}

/// JSON envelope: the summary fields plus the seed that produced the graph.
#[derive(Serialize)]
struct JsonRoute<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(flatten)]
    summary: &'a RouteSummary,
}

/// Render a route summary in JSON format.
pub fn render_json(summary: &RouteSummary, seed: Option<u64>) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &JsonRoute { seed, summary })
        .map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Text view: verdict first, then every ranked path.
pub fn render_text(summary: &RouteSummary, palette: ColorPalette) -> String {
    let ColorPalette {
        reset,
        white_bold,
        gray,
        green,
        yellow,
        red,
        ..
    } = palette;

    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Route from {white_bold}{}{reset} to {white_bold}{}{reset} (algorithm: {})",
        summary.source.display_name(),
        summary.destination.display_name(),
        serde_label(&summary.algorithm)
    );

    match (&summary.outcome, &summary.cheapest_route) {
        (RouteOutcome::Cheapest { cost, .. }, Some(route)) => {
            let names: Vec<_> = route.iter().map(|step| step.display_name()).collect();
            let _ = writeln!(
                buffer,
                "{green}Cheapest fare: {}{reset} via {}",
                format_fare(*cost),
                names.join(" -> ")
            );
        }
        (RouteOutcome::NoFiniteCheapest { .. }, _) => {
            let _ = writeln!(
                buffer,
                "{red}No finite cheapest path: a negative cycle reaches the destination{reset}"
            );
        }
        _ => {
            let _ = writeln!(
                buffer,
                "{yellow}{} is unreachable from {}{reset}",
                summary.destination.display_name(),
                summary.source.display_name()
            );
        }
    }

    if let Some(cycle) = &summary.negative_cycle {
        let mut names: Vec<_> = cycle
            .example_cycle
            .iter()
            .map(|step| step.display_name())
            .collect();
        if let Some(first) = names.first().copied() {
            names.push(first);
            let (colour, note) = if cycle.reaches_destination {
                (red, "")
            } else {
                (yellow, " (does not reach the destination)")
            };
            let _ = writeln!(
                buffer,
                "{colour}Negative cycle: {}{note}{reset}",
                names.join(" -> ")
            );
        }
    }

    if let Some(check) = &summary.verification {
        if !check.matches {
            let _ = writeln!(
                buffer,
                "{yellow}Cheapest enumerated path costs {}, expected {}{reset}",
                format_fare(check.enumerated_minimum),
                format_fare(check.algorithm_cost)
            );
        }
    }

    let _ = writeln!(
        buffer,
        "\nAvailable routes ({}{}):",
        summary.ranked_paths.len(),
        if summary.truncated { ", truncated" } else { "" }
    );
    for path in &summary.ranked_paths {
        let _ = writeln!(
            buffer,
            "{gray}{:>4}.{reset} {} {gray}|{reset} {}{}{reset} {gray}| {:.1} km{reset}",
            path.rank,
            path.names.join(" -> "),
            palette.fare(path.cost),
            format_fare(path.cost),
            path.distance
        );
    }

    buffer
}

/// Basic path format.
///
/// Uses `+`/`|`/`-` prefixes for first/middle/last steps of the cheapest
/// route, or a single line explaining why there is none.
pub fn render_basic(summary: &RouteSummary) -> String {
    let mut buffer = String::new();
    let Some(route) = &summary.cheapest_route else {
        let reason = if summary.no_finite_cheapest {
            "no finite cheapest path"
        } else {
            "unreachable"
        };
        let _ = writeln!(buffer, "{reason}");
        return buffer;
    };

    let len = route.len();
    for (i, step) in route.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        let _ = writeln!(buffer, "{} {}", prefix, step.display_name());
    }
    if let Some(cost) = summary.cheapest_cost() {
        let _ = writeln!(buffer, "fare {}", format_fare(cost));
    }
    buffer
}

/// Render the location catalogue.
pub fn render_locations(locations: &[Location], format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        let mut stdout = io::stdout();
        serde_json::to_writer_pretty(&mut stdout, locations).map_err(io::Error::other)?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }
    for location in locations {
        println!(
            "{:>3}  {:<20} {:>8.4} {:>9.4}",
            location.id, location.name, location.latitude, location.longitude
        );
    }
    Ok(())
}

/// The kebab-case name a value serializes to.
fn serde_label<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use farepath_lib::{plan_on_graph, Edge, Graph, Network, RouteAlgorithm};

    fn summary(edges: Vec<Edge>, destination: usize) -> RouteSummary {
        let graph = Graph::from_edges(3, edges).unwrap();
        let plan = plan_on_graph(graph, 0, destination, RouteAlgorithm::Auto, 10).unwrap();
        RouteSummary::from_plan(Network::builtin(), &plan).unwrap()
    }

    #[test]
    fn text_lists_cheapest_and_alternatives() {
        let summary = summary(
            vec![
                Edge::new(0, 1, 5, 1.0),
                Edge::new(0, 2, 2_000, 1.0),
                Edge::new(1, 2, 5, 1.0),
            ],
            2,
        );
        let text = render_text(&summary, ColorPalette::plain());
        assert!(text.contains("(algorithm: dijkstra)"));
        assert!(text.contains("Cheapest fare: 10 via Mumbai -> Delhi -> Bengaluru"));
        assert!(text.contains("   2. Mumbai -> Bengaluru | 2,000 | 1.0 km"));
    }

    #[test]
    fn basic_marks_first_middle_last() {
        let summary = summary(vec![Edge::new(0, 1, 5, 1.0), Edge::new(1, 2, 5, 1.0)], 2);
        assert_eq!(
            render_basic(&summary),
            "+ Mumbai\n| Delhi\n- Bengaluru\nfare 10\n"
        );
    }

    #[test]
    fn basic_explains_missing_route() {
        let summary = summary(vec![Edge::new(0, 1, 5, 1.0)], 2);
        assert_eq!(render_basic(&summary), "unreachable\n");
    }

    #[test]
    fn text_flags_negative_cycle() {
        let summary = summary(
            vec![
                Edge::new(0, 1, 10, 1.0),
                Edge::new(1, 2, 10, 1.0),
                Edge::new(2, 0, -25, 1.0),
            ],
            2,
        );
        let text = render_text(&summary, ColorPalette::plain());
        assert!(text.contains("(algorithm: bellman-ford)"));
        assert!(text.contains("No finite cheapest path"));
        assert!(text.contains("Negative cycle: "));
    }
}
