//! Configuration management for listening-history

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analytics::DEFAULT_TOP_LIMIT;
use crate::error::{Error, Result};
use crate::history::DEFAULT_EXTENSION;

/// Largest top-list length the dashboard will render.
const MAX_TOP_LIMIT: usize = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Where the export files live
    pub data: DataConfig,

    /// Dashboard rendering
    pub display: DisplayConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Input data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the streaming-history exports
    /// (default: ~/.local/share/listening-history)
    pub dir: Option<PathBuf>,

    /// File extension of export files
    pub extension: String,
}

/// Dashboard rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of entries in the top songs and top artists lists
    pub limit: usize,

    /// Draw bars next to ranked entries
    pub show_bars: bool,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOP_LIMIT,
            show_bars: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine config directory"))?;
        Ok(config_dir.join("listening-history").join("config.toml"))
    }

    /// Get the directory the export files are read from
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data.dir {
            Ok(dir.clone())
        } else {
            let data_dir = dirs::data_local_dir()
                .ok_or_else(|| Error::config("Could not determine data directory"))?;
            Ok(data_dir.join("listening-history"))
        }
    }

    /// Validate configuration values.
    ///
    /// Call this after loading to ensure all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.display.limit == 0 || self.display.limit > MAX_TOP_LIMIT {
            return Err(Error::config(format!(
                "display.limit must be between 1 and {MAX_TOP_LIMIT}, got {}",
                self.display.limit
            )));
        }

        let extension = self.data.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(Error::config("data.extension must not be empty"));
        }

        // Validate log_level is a known level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "log_level must be one of {:?}, got '{}'",
                valid_levels, self.general.log_level
            )));
        }

        Ok(())
    }

    /// The export file extension without a leading dot
    #[must_use]
    pub fn extension(&self) -> &str {
        self.data.extension.trim_start_matches('.')
    }
}
