//! Configuration loading
//!
//! Settings live in `~/.formcraft/config.yaml`. Every key is optional; the
//! `FORMCRAFT_API_URL` environment variable wins over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{API_URL_ENV, DEFAULT_API_URL, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    pub log_file: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".formcraft")
    }

    /// Load from the default location and apply the environment override
    pub fn load() -> Result<Self> {
        let path = Self::config_dir().join("config.yaml");
        let mut config = Self::load_from(&path)?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.set_api_url(&url);
        }
        Ok(config)
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        let url = config.api_url.clone();
        config.set_api_url(&url);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = url.trim().trim_end_matches('/').to_string();
    }
}
