//! Singlish E2E CLI - Main Entry Point
//!
//! `singlish-test` with no arguments runs the fixture against the
//! configured site and writes the reports.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use singlish_cli::commands::{self, capture, generate, run, EXIT_FATAL};
use singlish_cli::output::{self, OutputFormat};

/// Singlish to Sinhala transliteration E2E harness
#[derive(Parser)]
#[command(name = "singlish-test")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to singlish-test.toml when present)
    #[arg(short, long, global = true, env = "SINGLISH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format for the results table
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every fixture case against the site and write reports (default)
    Run(run::RunArgs),

    /// Write the built-in cases to a fixture workbook
    Generate(generate::GenerateArgs),

    /// Record the site's current output into the fixture workbook
    Capture(capture::CaptureArgs),
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = commands::load_config(cli.config.as_deref())?;
    debug!("Effective configuration: {:?}", config);

    match cli.command.unwrap_or_else(|| Commands::Run(run::RunArgs::default())) {
        Commands::Run(args) => run::execute(args, config, cli.format).await,
        Commands::Generate(args) => generate::execute(args, &config),
        Commands::Capture(args) => capture::execute(args, config).await,
    }
}

#[tokio::main]
async fn main() {
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

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            EXIT_FATAL
        }
    };

    std::process::exit(code);
}
