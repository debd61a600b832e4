//! Quick-stack settings
//!
//! Loaded from `config/quick_stack.json`, a default file is written when missing

use crate::error::ConfigError;
use crate::quick_stack::MAX_SEARCH_RADIUS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickStackConfig {
    /// Turn quick-stacking into storage networks on or off
    pub enabled: bool,

    /// Search radius around the player, in world units
    pub max_distance: u32,

    /// Width of one world tile, in world units
    pub tile_width: u32,
}

impl Default for QuickStackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: 200,
            tile_width: 16,
        }
    }
}

impl QuickStackConfig {
    /// Load configuration from `config/quick_stack.json`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or create the default there if missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: QuickStackConfig = serde_json::from_str(&content)?;
            config.validate()?;
            tracing::info!("Loaded quick-stack configuration from {}", path.display());
            Ok(config)
        } else {
            tracing::warn!(
                "No quick-stack config found, creating default at {}",
                path.display()
            );
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Rejects a zero tile width and any search radius wider than
    /// `MAX_SEARCH_RADIUS` cells
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_width == 0 {
            return Err(ConfigError::Invalid("tile_width must be positive".into()));
        }
        let cells = self.max_distance.div_ceil(self.tile_width);
        if cells > MAX_SEARCH_RADIUS as u32 {
            return Err(ConfigError::Invalid(format!(
                "max_distance {} spans {} tiles of width {}, at most {} allowed",
                self.max_distance, cells, self.tile_width, MAX_SEARCH_RADIUS
            )));
        }
        Ok(())
    }

    fn config_path() -> PathBuf {
        Path::new("config").join("quick_stack.json")
    }
}
