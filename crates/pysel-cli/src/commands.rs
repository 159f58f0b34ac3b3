//! Subcommand definitions and handlers.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use pysel_core::domain::{ExecutionRequest, Resource};

use crate::bootstrap::CliContext;

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the interpreter environment and print what was found
    Resolve {
        /// Interpreter path to classify (skips auto-selection)
        #[arg(long)]
        python: Option<String>,
        /// Workspace folder scoping configuration lookups
        #[arg(long)]
        resource: Option<PathBuf>,
    },

    /// Run the resolved interpreter with the given arguments
    Exec {
        /// Interpreter path to use (skips auto-selection)
        #[arg(long)]
        python: Option<String>,
        /// Workspace folder scoping configuration lookups
        #[arg(long)]
        resource: Option<PathBuf>,
        /// Arguments passed to the interpreter
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },

    /// Run a module (python -m) inside the resolved environment
    Module {
        /// Module name to run
        name: String,
        /// Interpreter path to use (skips auto-selection)
        #[arg(long)]
        python: Option<String>,
        /// Workspace folder scoping configuration lookups
        #[arg(long)]
        resource: Option<PathBuf>,
        /// Arguments passed to the module
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

fn request_for(python: Option<String>, resource: Option<PathBuf>) -> ExecutionRequest {
    let mut request = ExecutionRequest::new();
    if let Some(python) = python {
        request = request.with_python_path(python);
    }
    if let Some(resource) = resource {
        request = request.with_resource(Resource::new(resource));
    }
    request
}

/// Dispatch a parsed command. Returns the process exit code.
pub async fn dispatch(context: &CliContext, command: Commands) -> Result<i32> {
    match command {
        Commands::Resolve { python, resource } => {
            handle_resolve(context, request_for(python, resource)).await
        }
        Commands::Exec {
            python,
            resource,
            args,
        } => handle_exec(context, request_for(python, resource), args).await,
        Commands::Module {
            name,
            python,
            resource,
            args,
        } => handle_module(context, request_for(python, resource), &name, args).await,
    }
}

async fn handle_resolve(context: &CliContext, request: ExecutionRequest) -> Result<i32> {
    let handle = context.resolver().create_environment(&request).await?;
    let environment = handle.environment();

    println!("kind:       {}", environment.kind_name());
    println!("executable: {}", handle.executable_path().await?.display());

    match handle.interpreter_info().await {
        Ok(info) => {
            println!("version:    {}", info.version);
            println!("sys.prefix: {}", info.sys_prefix);
            println!("arch:       {}", if info.is64_bit { "64-bit" } else { "32-bit" });
        }
        Err(error) => {
            println!("version:    unavailable ({error})");
        }
    }
    Ok(0)
}

async fn handle_exec(
    context: &CliContext,
    request: ExecutionRequest,
    args: Vec<String>,
) -> Result<i32> {
    let handle = context.resolver().create_environment(&request).await?;
    let output = handle.exec(&args).await?;
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    Ok(output.exit_code.unwrap_or(1))
}

async fn handle_module(
    context: &CliContext,
    request: ExecutionRequest,
    module: &str,
    args: Vec<String>,
) -> Result<i32> {
    let handle = context.resolver().create_environment(&request).await?;
    let output = handle.exec_module(module, &args).await?;
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    Ok(output.exit_code.unwrap_or(1))
}
