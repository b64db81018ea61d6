// ============================================================================
// File: src/config.rs
// Configuration structures and validation
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_ENV: &str = "SPOONACULAR_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, from the environment and an optional JSON file
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Spoonacular API key. A missing key is reported per search, not at startup.
    pub api_key: Option<String>,

    /// Base URL of the recipe API (e.g., "https://api.spoonacular.com")
    pub base_url: String,

    /// Image shown when a recipe has none
    pub placeholder_image: String,

    /// Request timeout for the HTTP client, in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Defaults overlaid with the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_lookup(|name| std::env::var(name).ok())
    }

    /// Load a JSON config file, then fill the gaps from the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config: {}", e))?;
        Ok(config.with_env_lookup(|name| std::env::var(name).ok()))
    }

    /// The key from the file wins; the environment only supplies a missing one.
    fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.api_key.as_deref().map_or(true, str::is_empty) {
            self.api_key = lookup(API_KEY_ENV).filter(|k| !k.is_empty());
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            self.base_url = base_url;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("Base URL must not be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(anyhow!(
                "Base URL must start with http:// or https://, got {}",
                self.base_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("Timeout must be at least one second"));
        }

        Ok(())
    }
}
