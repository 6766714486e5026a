//! Optional TOML settings, read from `~/.kadath/config.toml`.
//!
//! Every field has a default, so a missing file or a partial one is fine.
//! Command-line flags override what is read here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where save slots live. Defaults to `~/.kadath/saves`.
    pub save_dir: Option<PathBuf>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub autosave_on_travel: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            seed: None,
            log_level: "info".to_string(),
            autosave_on_travel: true,
        }
    }
}

impl GameConfig {
    /// `~/.kadath`, home of the config, the log and the saves.
    pub fn home() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".kadath"))
            .ok_or_else(|| anyhow!("Could not determine home directory"))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| anyhow!("Failed to parse config: {}", e))
    }

    /// Reads `path`. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
