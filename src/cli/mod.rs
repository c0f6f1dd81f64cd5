//! CLI module for the nettopo resolver.
//!
//! This module provides the command-line interface for validating specs,
//! inspecting emission plans, and querying resolved topologies.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat, RoleArg};
pub use output::OutputFormatter;
