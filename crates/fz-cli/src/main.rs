//! # fz CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fz_cli::inspect::{
    run_check_catalog, run_lookup, run_regions, run_zone, CheckCatalogArgs, LookupArgs,
    RegionsArgs, ZoneArgs,
};
use fz_cli::selection::{run_expand, run_validate, ExpandArgs, ValidateArgs};
use fz_cli::setup::{run_setup, SetupArgs};
use fz_cli::{GlobalOptions, OutputFormat};

/// Freight zone engine CLI
///
/// Inspects the geography catalog, validates and expands zone selections,
/// and produces the zone setup consumed by the pricing-matrix editor.
#[derive(Parser, Debug)]
#[command(name = "fz", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog document (YAML or JSON). Defaults to $FZ_CATALOG_PATH, then
    /// the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List regions and their zones.
    Regions(RegionsArgs),

    /// Show one zone definition.
    Zone(ZoneArgs),

    /// Validate a zone selection. Exits 1 when invalid.
    Validate(ValidateArgs),

    /// Expand a zone selection into states and cities.
    Expand(ExpandArgs),

    /// Run a zone selection session and print the zone setup.
    Setup(SetupArgs),

    /// List the zones covering a city.
    Lookup(LookupArgs),

    /// Load the catalog and report counts, lints, and contested cities.
    CheckCatalog(CheckCatalogArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("fz CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let opts = GlobalOptions {
        catalog: cli.catalog,
        format: cli.format,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Regions(args) => run_regions(&args, &opts, &mut out),
        Commands::Zone(args) => run_zone(&args, &opts, &mut out),
        Commands::Validate(args) => run_validate(&args, &opts, &mut out),
        Commands::Expand(args) => run_expand(&args, &opts, &mut out),
        Commands::Setup(args) => run_setup(&args, &opts, &mut out),
        Commands::Lookup(args) => run_lookup(&args, &opts, &mut out),
        Commands::CheckCatalog(args) => run_check_catalog(&args, &opts, &mut out),
    };

    match flush_output(result, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Flush `out` and fold a flush failure into the handler result.
fn flush_output(result: anyhow::Result<u8>, out: &mut dyn Write) -> anyhow::Result<u8> {
    let flushed = out.flush().context("failed to write output");
    let code = result?;
    flushed?;
    Ok(code)
}
