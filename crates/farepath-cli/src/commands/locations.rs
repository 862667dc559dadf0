//! Locations command handler: list the network being planned over.

use anyhow::{Context, Result};

use crate::config::RunConfig;
use crate::output::{render_locations, OutputFormat};

/// Print every location with its id and coordinates.
pub fn handle_locations_command(config: &RunConfig, format: OutputFormat) -> Result<()> {
    render_locations(config.network.locations(), format).context("failed to write locations")
}
