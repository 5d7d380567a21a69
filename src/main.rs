use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tick_snake::game::GameConfig;
use tick_snake::logging;
use tick_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tick_snake")]
#[command(version, about = "Snake on a fixed tick in the terminal")]
struct Cli {
    /// TOML file with game settings, flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More log detail, -v for debug and -vv for per-tick trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_ms = tick_rate;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::setup(path, logging::level_for(cli.verbose))?;
    }

    let config = cli.game_config()?;
    log::info!("starting with {config:?}");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
