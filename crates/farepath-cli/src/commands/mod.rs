//! Module exports for CLI subcommands
//!
//! Each module handles one subcommand. main.rs parses arguments and dispatches
//! to these handlers.

pub mod locations;
pub mod route;
