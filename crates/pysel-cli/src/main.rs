//! CLI entry point.
//!
//! Parses arguments, initializes tracing, and dispatches to command
//! handlers through the bootstrap context.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pysel_cli::{Cli, CliContext, commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let context = CliContext::init(None).await?;
    let code = commands::dispatch(&context, cli.command).await?;
    context.shutdown().await;
    Ok(code)
}
