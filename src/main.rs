//! Nettopo CLI entrypoint.
//!
//! This is the main entrypoint for the nettopo command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use nettopo::cli::{Cli, Commands, OutputFormatter};
use nettopo::emitter::{EmissionExecutor, EmissionPlanner, RecordingEmitter};
use nettopo::error::{NettopoError, Result};
use nettopo::spec::{NetworkSpec, SpecParser, SpecValidator, find_spec_file};
use nettopo::topology::{SelectionCriteria, Topology, TopologyBuilder};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Validate { warnings } => cmd_validate(cli.config.as_ref(), warnings, &formatter),
        Commands::Plan { detailed } => cmd_plan(cli.config.as_ref(), detailed, &formatter),
        Commands::Select {
            role,
            group,
            one_per_az,
        } => {
            let criteria = SelectionCriteria {
                role: role.map(Into::into),
                group_name: group,
                one_per_az,
            };
            cmd_select(cli.config.as_ref(), &criteria, &formatter)
        }
        Commands::Rehearse { continue_on_error } => {
            cmd_rehearse(cli.config.as_ref(), continue_on_error, &formatter).await
        }
        Commands::Defaults => cmd_defaults(),
    }
}

/// Validate the network specification.
fn cmd_validate(
    spec_path: Option<&PathBuf>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let spec = load_spec(spec_path)?;

    let validator = SpecValidator::new();
    let report = validator.check(&spec);
    eprintln!("{}", formatter.format_report(&report, show_warnings));

    if !report.is_valid() {
        return Err(NettopoError::Spec(nettopo::error::SpecError::validation(
            report.issues.iter().map(ToString::to_string).collect(),
        )));
    }

    // Show summary
    eprintln!("Spec summary:");
    eprintln!("  Network: {}", spec.cidr_block);
    eprintln!("  Zones: {}", spec.availability_zones.len());
    eprintln!("  Groups: {}", spec.subnet_groups.len());
    eprintln!("  Subnets: {}", spec.member_count());

    Ok(())
}

/// Resolve the topology and show the emission plan.
fn cmd_plan(
    spec_path: Option<&PathBuf>,
    detailed: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let (spec, topology) = load_and_build(spec_path)?;

    let planner = EmissionPlanner::new();
    let plan = planner.plan(&spec, &topology);

    eprintln!("{}", formatter.format_plan(&plan));

    if detailed {
        eprintln!("\nInstructions:");
        for instruction in &plan.instructions {
            eprintln!("  {instruction}");
        }
    }

    Ok(())
}

/// Query subnets from the resolved topology.
fn cmd_select(
    spec_path: Option<&PathBuf>,
    criteria: &SelectionCriteria,
    formatter: &OutputFormatter,
) -> Result<()> {
    let (_, topology) = load_and_build(spec_path)?;

    let result = topology.select(criteria)?;
    eprintln!("{}", formatter.format_selection(&result));

    Ok(())
}

/// Walk the emission plan through the recording emitter.
async fn cmd_rehearse(
    spec_path: Option<&PathBuf>,
    continue_on_error: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let (spec, topology) = load_and_build(spec_path)?;

    let planner = EmissionPlanner::new();
    let plan = planner.plan(&spec, &topology);

    let emitter = RecordingEmitter::new();
    let executor = EmissionExecutor::new(&emitter).with_continue_on_error(continue_on_error);
    let report = executor.execute(&plan, &topology).await?;

    eprintln!("{}", formatter.format_rehearsal(&report));
    Ok(())
}

/// Print the built-in default isolated network spec.
fn cmd_defaults() -> Result<()> {
    let spec = NetworkSpec::default_isolated();
    let yaml = serde_yaml::to_string(&spec)
        .map_err(|e| NettopoError::internal(format!("Failed to render defaults: {e}")))?;
    eprintln!("{yaml}");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the spec path, searching parent directories if none given.
fn resolve_spec_path(spec_path: Option<&PathBuf>) -> Result<PathBuf> {
    spec_path.map_or_else(|| find_spec_file("."), |path| Ok(path.clone()))
}

/// Loads the network specification with environment overrides.
fn load_spec(spec_path: Option<&PathBuf>) -> Result<NetworkSpec> {
    let path = resolve_spec_path(spec_path)?;
    debug!("Loading network spec from: {}", path.display());

    let parser = SpecParser::new();
    parser.load_with_env(&path)
}

/// Loads, validates, and resolves the specification into a topology.
fn load_and_build(spec_path: Option<&PathBuf>) -> Result<(NetworkSpec, Topology)> {
    let spec = load_spec(spec_path)?;

    let validator = SpecValidator::new();
    validator.validate(&spec)?;

    let builder = TopologyBuilder::new();
    let topology = builder.build(&spec)?;
    info!(
        "Resolved {} subnets for network {}",
        topology.subnet_count(),
        topology.cidr_block()
    );

    Ok((spec, topology))
}
