//! CLI Module
//!
//! Command-line interface for inspecting layer graphs: resolution orders
//! and simulated lifecycle traces, driven by JSON graph descriptions.

pub mod commands;
pub mod graph;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strata - composable test-fixture layers
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a layer's resolution order, one layer per line
    #[command(name = "order")]
    Order {
        /// Path to the graph description (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Name of the layer to resolve
        #[arg(short, long)]
        layer: String,
    },

    /// Simulate a test run and print the hook invocation trace
    #[command(name = "simulate")]
    Simulate {
        /// Path to the graph description (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Name of the layer the simulated tests use
        #[arg(short, long)]
        layer: String,

        /// Number of per-test cycles to simulate
        #[arg(short, long, default_value_t = 1)]
        tests: usize,
    },
}
