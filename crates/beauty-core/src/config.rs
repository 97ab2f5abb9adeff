use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AssistantError, Result};

/// Store used for chat, inventory and compare requests when nothing else is configured.
pub const DEFAULT_STORE_ID: &str = "WH001";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_id")]
    pub store_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How many ticks a notification stays in the status bar.
    #[serde(default = "default_notice_ticks")]
    pub notice_ticks: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_store_id() -> String {
    DEFAULT_STORE_ID.to_string()
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_notice_ticks() -> u32 {
    40
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_id: default_store_id(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notice_ticks: default_notice_ticks(),
        }
    }
}

impl AssistantConfig {
    /// Load config from ~/.config/beauty-assistant/config.toml, creating defaults if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .map_err(|e| AssistantError::Config(format!("Failed to read config: {e}")))?;
            Self::from_toml(&contents)
        } else {
            let config = AssistantConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse a config document. Missing sections and keys fall back to defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AssistantError::Config(format!("Failed to parse config: {e}")))
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| AssistantError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            AssistantError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("beauty-assistant").join("config.toml"))
    }

    /// Base URL with any trailing slash removed, ready for `format!("{}/path")`.
    pub fn api_base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}
