//! cildep CLI - SELinux module dependency inspector.
//!
//! Usage:
//!   cildep modules               # List scanned modules
//!   cildep types                 # Type -> owning module index
//!   cildep deps                  # Direct dependency graph
//!   cildep enable gogs,nginx     # What must be enabled, transitively
//!   cildep disable init          # What disabling would impact
//!   cildep stats                 # Graph summary counts
//!
//! All data output is JSON on stdout; diagnostics go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cildep::{scan_modules, ModuleGraph, ScanConfig, DEFAULT_BASE_DIR};

#[derive(Parser)]
#[command(name = "cildep", version)]
#[command(about = "Inspect SELinux module dependencies from the CIL policy store")]
struct Cli {
    /// Base path of the policy module store
    #[arg(short, long, default_value = DEFAULT_BASE_DIR, global = true)]
    base_dir: PathBuf,

    /// Increase diagnostic verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit single-line JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all scanned modules with their declared and required types
    Modules,

    /// Show the type -> owning module index
    Types,

    /// Show the direct module dependency graph
    Deps,

    /// Show everything that must be enabled for the given modules
    Enable {
        /// Module names (comma- or space-separated)
        #[arg(required = true, value_delimiter = ',')]
        modules: Vec<String>,
    },

    /// Show everything impacted by disabling the given modules
    Disable {
        /// Module names (comma- or space-separated)
        #[arg(required = true, value_delimiter = ',')]
        modules: Vec<String>,
    },

    /// Show graph statistics
    Stats,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ScanConfig::new(&cli.base_dir);
    let records = scan_modules(&config)?;
    let graph = ModuleGraph::from_records(records);

    match cli.command {
        Commands::Modules => print_json(&graph.records(), cli.compact)?,
        Commands::Types => print_json(graph.type_index(), cli.compact)?,
        Commands::Deps => print_json(graph.dependencies(), cli.compact)?,
        Commands::Enable { modules } => print_json(&graph.enable_set(&modules), cli.compact)?,
        Commands::Disable { modules } => {
            print_json(&graph.disable_impact_set(&modules), cli.compact)?
        }
        Commands::Stats => print_json(&graph.stats(), cli.compact)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
