//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphcorpus/settings.json

use crate::core::settings::{CorpusSettings, GenerationSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User configuration from ~/.config/glyphcorpus/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments.
/// Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub generation: GenerationSettings,
    pub corpus: CorpusSettings,
}

impl ConfigFile {
    /// Get the path to the glyphcorpus config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphcorpus")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. The default location is
    /// optional, and a broken file there only produces a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::read(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Ignoring {}: {e:#}", path.display());
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        debug!("Loaded user settings from {:?}", path);
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Write a settings file with the built-in defaults.
    ///
    /// An existing file is left untouched. Returns the settings path.
    pub fn initialize(path: Option<&Path>) -> Result<PathBuf> {
        let settings_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if settings_path.exists() {
            println!("Settings file already exists: {:?}", settings_path);
        } else {
            Self::default().save(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        }
        Ok(settings_path)
    }
}
