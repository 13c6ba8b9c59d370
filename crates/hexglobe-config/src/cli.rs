//! Command-line argument parsing for hexglobe.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// hexglobe command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "hexglobe",
    about = "Generate a raster-colored Goldberg polyhedron globe as a GLB model"
)]
pub struct CliArgs {
    /// Subdivision depth of the geodesic sphere.
    #[arg(long, short)]
    pub frequency: Option<u32>,

    /// Output GLB path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// World imagery raster (plate carrée PNG, JPEG or TIFF).
    #[arg(long)]
    pub raster: Option<PathBuf>,

    /// Worker threads for mesh assembly (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Rotation about the X axis before export, in degrees (0 disables).
    #[arg(long, allow_hyphen_values = true)]
    pub rotate_x: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(f) = args.frequency {
            self.globe.frequency = f;
        }
        if let Some(ref output) = args.output {
            self.globe.output = Some(output.clone());
        }
        if let Some(ref raster) = args.raster {
            self.raster.path = raster.clone();
        }
        if let Some(w) = args.workers {
            self.globe.workers = w;
        }
        if let Some(deg) = args.rotate_x {
            self.export.rotate_x_degrees = deg;
        }
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
    }
}
