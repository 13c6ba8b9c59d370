//! `hexglobe` binary: builds a raster-colored Goldberg globe and writes it as GLB.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hexglobe-app -- --frequency 5 --raster world.tif`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hexglobe_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(|| Config::default_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexglobe_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        frequency = config.globe.frequency,
        raster = %config.raster.path.display(),
        "Starting hexglobe"
    );

    match hexglobe_app::run(&config) {
        Ok(summary) => {
            info!(
                output = %summary.output.display(),
                hexagons = summary.census.hexagons,
                pentagons = summary.census.pentagons,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Globe generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
