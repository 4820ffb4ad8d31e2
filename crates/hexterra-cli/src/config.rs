//! Generator run configuration.
//!
//! Loaded from `hexterra.toml`. Every field is optional; a missing or broken
//! file falls back to the reference setup.

use hexterra_world::{CatalogConfig, GeneratorSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "hexterra.toml";

/// Largest accepted grid radius.
pub const MAX_RADIUS: u32 = 512;

/// Largest accepted number of smoothing passes.
pub const MAX_PASSES: u32 = 1_000;

/// Largest accepted attempt budget per cell.
pub const MAX_ATTEMPTS: u32 = 100_000;

/// Full configuration of a generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    // === Board ===
    /// Number of rings around the central cell
    pub radius: u32,
    /// Smoothing passes after seeding
    pub passes: u32,
    /// Random seed (None = random)
    pub seed: Option<u64>,

    // === Sampling ===
    /// Rejection-sampling parameters
    pub generator: GeneratorSettings,

    // === Landscapes ===
    /// Categories and influence table
    pub catalog: CatalogConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            passes: 1,
            seed: None,
            generator: GeneratorSettings::default(),
            catalog: CatalogConfig::reference(),
        }
    }
}

impl TerrainConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp run parameters to sensible ranges.
    ///
    /// Catalog contents are not touched here; the catalog validates itself
    /// when it is built.
    pub fn validate(&mut self) {
        self.radius = self.radius.min(MAX_RADIUS);
        self.passes = self.passes.min(MAX_PASSES);
        self.generator.max_attempts = self.generator.max_attempts.clamp(1, MAX_ATTEMPTS);
        if self.generator.threshold_min > self.generator.threshold_max {
            warn!(
                "Threshold range [{}, {}] is inverted, swapping bounds",
                self.generator.threshold_min, self.generator.threshold_max
            );
            std::mem::swap(
                &mut self.generator.threshold_min,
                &mut self.generator.threshold_max,
            );
        }
    }

    /// Default location next to the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }
}
