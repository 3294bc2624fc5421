use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::{Result, WalkError},
    provider::openweather::DEFAULT_BASE_URL,
};

/// Environment variable consulted for the API key before the config file.
pub const API_KEY_ENV: &str = "WALKABILITY_API_KEY";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Override for the OpenWeather endpoint, mostly useful for testing.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            WalkError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            WalkError::Config(format!("failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WalkError::Config(format!(
                    "failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| WalkError::Config(format!("failed to serialize configuration: {e}")))?;

        fs::write(path, toml).map_err(|e| {
            WalkError::Config(format!("failed to write config file {}: {e}", path.display()))
        })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "walkability", "walkability")
            .ok_or_else(|| WalkError::Config("could not determine platform config directory".into()))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Pick the API key: explicit value first, then [`API_KEY_ENV`], then the config file.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        self.resolve_api_key_with(explicit, std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key_with(&self, explicit: Option<&str>, from_env: Option<String>) -> Option<String> {
        explicit
            .map(str::to_owned)
            .into_iter()
            .chain(from_env)
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}
