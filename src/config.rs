use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::StorageManager;

/// Environment variable that overrides `data_file`.
pub const DATA_FILE_ENV: &str = "SNIPNOTE_DATA_FILE";

/// User settings read from `<config dir>/snipnote/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the snippet document.
    pub data_file: Option<PathBuf>,
    /// Enables debug logging and honours `RUST_LOG`.
    pub debug: bool,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snipnote").join("config.toml"))
    }

    /// Parses a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the user config and applies the environment override. A
    /// malformed file yields the defaults together with the parse error, which
    /// the caller logs once logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        let (config, problem) = Self::load_from(Self::default_path().as_deref());
        (config.with_env_override(), problem)
    }

    fn load_from(path: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        match path.map(Self::from_file) {
            Some(Ok(config)) => (config, None),
            Some(Err(e)) => (Self::default(), Some(e)),
            None => (Self::default(), None),
        }
    }

    fn with_env_override(mut self) -> Self {
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            self.data_file = Some(PathBuf::from(path));
        }
        self
    }

    /// The document path to use: configured, or the platform default.
    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => StorageManager::default_path(),
        }
    }
}
