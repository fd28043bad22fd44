use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the remote API base URL.
pub const BASE_URL_ENV: &str = "REMOTE_API";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote API, e.g. "https://api.example.com"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the default location. A missing file is not an
    /// error; it just contributes nothing.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(target: "config", "No config file at {}", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the given location, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("scripts-client").join("config.toml"))
    }

    /// Pick the base URL: environment first, then the config file.
    ///
    /// `lookup` stands in for `std::env::var` so callers can resolve
    /// against any source of variables.
    pub fn resolve_base_url<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(target: "config", "Using base URL from ${}", BASE_URL_ENV);
            return Ok(url.trim().to_string());
        }

        if let Some(url) = self.base_url.as_deref().filter(|v| !v.trim().is_empty()) {
            debug!(target: "config", "Using base URL from config file");
            return Ok(url.trim().to_string());
        }

        Err(anyhow!(
            "No API base URL configured. Set ${} or add base_url to {}",
            BASE_URL_ENV,
            Self::get_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string())
        ))
    }

    /// Resolve the base URL the way the binary does at startup: load
    /// `.env` if present, then consult the process environment and the
    /// default config file.
    pub fn base_url_from_env() -> Result<String> {
        if let Ok(path) = dotenv::dotenv() {
            debug!(target: "config", "Loaded environment from {}", path.display());
        }
        Self::load()?.resolve_base_url(|key| std::env::var(key).ok())
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        format!(
            r#"# Scripts client configuration
# Location: ~/.config/scripts-client/config.toml (Linux)
#           ~/Library/Application Support/scripts-client/config.toml (macOS)
#           %APPDATA%\scripts-client\config.toml (Windows)
#
# The ${BASE_URL_ENV} environment variable (or a .env file) takes precedence.

# Base URL of the remote API
# base_url = "https://api.example.com"
"#
        )
    }
}
