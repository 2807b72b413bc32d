//! Swagcheck CLI - Main Entry Point
//!
//! Command-line runner for the Swag Labs login suites: run suites against
//! a live browser or the built-in page model, list and validate suite
//! files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{list, run, validate};
use swagcheck_harness::HarnessConfig;

/// Swagcheck - browser E2E runner for the Swag Labs demo storefront
#[derive(Parser)]
#[command(name = "swagcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, default_value = "swagcheck.toml", global = true)]
    config: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run test suites
    Run(run::RunArgs),

    /// List discovered test suites
    List(list::ListArgs),

    /// Parse-check suite files
    Validate(validate::ValidateArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = HarnessConfig::load(&cli.config)?;

    match cli.command {
        Commands::Run(args) => match run::execute(args, config, cli.format).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                output::print_error(&format!("{e:#}"));
                std::process::exit(2);
            }
        },
        Commands::List(args) => list::execute(args, &config, cli.format)?,
        Commands::Validate(args) => validate::execute(args, &config, cli.format)?,
        Commands::Version => {
            println!("Swagcheck v{}", env!("CARGO_PKG_VERSION"));
            println!("Browser E2E runner for the Swag Labs demo storefront");
        }
    }

    Ok(())
}
