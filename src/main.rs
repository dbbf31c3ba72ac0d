//! Wildlands binary: parses the command line and runs the Bevy app.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use wildlands::{init_logging, PresentationPlugin, SimulationConfig, SimulationPlugin};

/// Explore the wilds, fight monsters and trade with the blacksmith
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for world generation and all session randomness
    #[arg(short, long, default_value_t = 4242)]
    seed: u64,

    /// JSON file overriding the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(config_path: Option<&PathBuf>) -> Result<SimulationConfig> {
    let Some(path) = config_path else {
        return Ok(SimulationConfig::default());
    };
    SimulationConfig::from_path(path)
        .with_context(|| format!("loading configuration from {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _fresh_logger = init_logging(args.verbose);
    let config = load_config(args.config.as_ref())?;

    let exit = App::new()
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_plugins(SimulationPlugin {
            config,
            seed: args.seed,
        })
        .add_plugins(PresentationPlugin)
        .run();
    anyhow::ensure!(!exit.is_error(), "application exited with {exit:?}");
    Ok(())
}
