//! Strata CLI - Layer Graph Inspection
//!
//! Command-line interface for inspecting layer graphs and simulating runs.

use clap::Parser;
use env_logger::Env;
use log::info;

use strata::cli::{commands, Cli, Commands};
use strata::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Strata fixture engine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Strata fixture engine v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Order { graph, layer } => commands::order(&graph, &layer),
        Commands::Simulate {
            graph,
            layer,
            tests,
        } => commands::simulate(&graph, &layer, tests),
    }
}
