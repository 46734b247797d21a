use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use grindlog::config::Config;

mod cli;
mod commands;

use commands::Commands;

#[derive(Parser)]
#[command(name = "grindlog")]
#[command(about = "Grinding counters with spreadsheet import/export")]
#[command(version)]
struct Cli {
    /// Directory for the ledger database and spreadsheets (overrides config)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the config file (defaults to grindlog.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_dir(&std::env::current_dir()?)?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Add {
            game,
            username,
            count,
        } => cli::add::add_command(&config, &game, &username, count),
        Commands::Import { file } => cli::import::import_command(&config, file.as_deref()),
        Commands::Export { game } => cli::export::export_command(&config, game.as_deref()),
        Commands::Games => cli::games::games_command(&config),
    }
}
