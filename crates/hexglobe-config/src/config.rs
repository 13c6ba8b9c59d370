//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name used under the OS configuration directory.
pub const APP_NAME: &str = "hexglobe";

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Mesh generation settings.
    pub globe: GlobeConfig,
    /// World imagery settings.
    pub raster: RasterConfig,
    /// Model export settings.
    pub export: ExportConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Geodesic sphere generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Subdivision depth. Face count grows as `10 · 4^frequency + 2`.
    pub frequency: u32,
    /// Worker threads for mesh assembly (0 = one per CPU).
    pub workers: usize,
    /// Output file. Defaults to `geodesic_sphere_{frequency}.glb`.
    pub output: Option<PathBuf>,
}

/// World imagery raster and its geographic extent in degrees.
///
/// The extent is not read from the file: GeoTIFF georeferencing tags are
/// ignored, so bounds for anything other than a whole-world image must be
/// set here by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RasterConfig {
    /// Image file (PNG, JPEG or TIFF) in plate carrée projection.
    pub path: PathBuf,
    /// Longitude of the left edge.
    pub west: f64,
    /// Latitude of the top edge.
    pub north: f64,
    /// Longitude of the right edge.
    pub east: f64,
    /// Latitude of the bottom edge.
    pub south: f64,
}

/// Model export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Rotation about the X axis applied before writing, in degrees.
    /// The default turns the +Z north pole into glTF's +Y up axis; 0 disables it.
    pub rotate_x_degrees: f64,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (e.g., "debug", "info,hexglobe_geodesic=debug").
    pub level: String,
}

// --- Default implementations ---

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            frequency: 7,
            workers: 0,
            output: None,
        }
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("NE2_HR_LC_SR_W_DR/NE2_HR_LC_SR_W_DR.tif"),
            west: -180.0,
            north: 90.0,
            east: 180.0,
            south: -90.0,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rotate_x_degrees: -90.0,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GlobeConfig {
    /// The configured output path, or `geodesic_sphere_{frequency}.glb`.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("geodesic_sphere_{}.glb", self.frequency)))
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// The platform configuration directory for hexglobe.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
