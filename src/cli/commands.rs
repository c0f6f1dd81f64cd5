//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::spec::SubnetRole;

/// Nettopo - declarative network topology resolver.
#[derive(Parser, Debug)]
#[command(name = "nettopo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the network spec file or fragment directory.
    #[arg(short, long, global = true, env = "NETTOPO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the network specification.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Resolve the topology and display the emission plan.
    Plan {
        /// List every planned instruction.
        #[arg(short, long)]
        detailed: bool,
    },

    /// Query subnets from the resolved topology.
    Select {
        /// Select by role (exclusive with --group).
        #[arg(long)]
        role: Option<RoleArg>,

        /// Select by group name (exclusive with --role).
        #[arg(long)]
        group: Option<String>,

        /// Restrict the result to the group of the first match.
        #[arg(long)]
        one_per_az: bool,
    },

    /// Walk the emission plan through the in-memory recording emitter.
    Rehearse {
        /// Continue past failing instructions.
        #[arg(long)]
        continue_on_error: bool,
    },

    /// Print the built-in default isolated network spec as YAML.
    Defaults,
}

/// Subnet role argument for selection queries.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RoleArg {
    /// Public subnets.
    Public,
    /// Private subnets.
    Private,
    /// Isolated subnets.
    Isolated,
}

impl From<RoleArg> for SubnetRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Public => Self::Public,
            RoleArg::Private => Self::Private,
            RoleArg::Isolated => Self::Isolated,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
