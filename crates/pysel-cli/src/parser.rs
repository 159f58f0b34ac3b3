//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for resolving and running Python interpreters.
#[derive(Parser)]
#[command(name = "pysel")]
#[command(about = "Resolve, classify, and run Python interpreter environments")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
