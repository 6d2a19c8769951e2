//! Matchstick CLI - Command-line interface
//!
//! Commands:
//! - play: Hot-seat game in the terminal
//! - simulate: Random playouts from the configured opening

mod command;
mod play;
mod simulate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use matchstick_core::GameConfig;

#[derive(Parser)]
#[command(name = "matchstick")]
#[command(about = "Matchstick territory game on a triangular grid")]
struct Cli {
    /// Game setup JSON file (default: standard opening)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat game in the terminal
    Play(play::PlayArgs),
    /// Run random playouts and report statistics
    Simulate(simulate::SimulateArgs),
}

fn main() -> Result<()> {
    // Initialize logging (stderr, so reports on stdout stay clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play(args) => play::run(args, config),
        Commands::Simulate(args) => simulate::run(args, config),
    }
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let config = GameConfig::load(path)?;
            tracing::info!("Loaded game setup from {}", path.display());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_belongs_to_simulate() {
        let cli = Cli::try_parse_from(["matchstick", "simulate", "--seed", "7"]).unwrap();
        match cli.command {
            Commands::Simulate(args) => assert_eq!(args.seed, 7),
            Commands::Play(_) => panic!("expected simulate"),
        }

        assert!(Cli::try_parse_from(["matchstick", "play", "--seed", "7"]).is_err());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["matchstick", "play", "--config", "setup.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("setup.json")));
    }
}
