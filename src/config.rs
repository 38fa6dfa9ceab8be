//! Configuration loading
//!
//! Curve, reward and projection constants, read from a RON file with
//! fallback to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ProgressError;
use crate::finance::ProjectionConfig;
use crate::progression::{LevelCurve, RewardTable};

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "klimatrack.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ProgressError),
}

/// All tunable constants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub curve: LevelCurve,
    pub rewards: RewardTable,
    pub projection: ProjectionConfig,
}

impl Config {
    /// Parse and validate a RON document. Missing sections keep defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Config = ron::from_str(text)?;
        config.rewards.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Config loaded from {:?}", path);
        Ok(config)
    }

    /// Load from the platform config directory, or use defaults
    pub fn load() -> Self {
        let Some(path) = default_path() else {
            log::debug!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ProgressError> {
        self.curve.validate()?;
        self.rewards.validate()?;
        self.projection.validate()?;
        Ok(())
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Write this config for editing
    pub fn export(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_ron_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config written to {:?}", path);
        Ok(())
    }
}

/// `<config dir>/klimatrack.ron`, if the platform has a config directory
pub fn default_path() -> Option<PathBuf> {
    use directories::ProjectDirs;

    ProjectDirs::from("at", "klimatrack", "Klimatrack")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
