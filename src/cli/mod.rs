use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Drop Log Report Engine
#[derive(Parser)]
#[command(name = "droplog-reports")]
#[command(about = "Aggregate game drop logs into per-level drop-rate reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate reports for every level with logs
    Generate(commands::generate::GenerateCommand),
    /// Show the latest report for a level
    Show(commands::show::ShowCommand),
    /// List persisted report headers
    List(commands::list::ListCommand),
    /// Print the effective configuration as TOML
    Config(commands::config::ConfigCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(command) => command.run().await,
        Commands::Show(command) => command.run(),
        Commands::List(command) => command.run(),
        Commands::Config(command) => command.run(),
    }
}
