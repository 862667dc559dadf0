//! Farepath CLI library.
//!
//! Argument handling, configuration and output formatting for the `farepath`
//! binary, kept in a library so they can be unit tested.

pub mod commands;
pub mod config;
pub mod output;
pub mod terminal;
