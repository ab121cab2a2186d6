use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;
use crate::model::DEFAULT_QUEUE_NAME;
use crate::script::ScriptContext;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub automation: AutomationConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// How scripts reach the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_application")]
    pub application: String,
    /// Bounded wait per call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Playlist owned by amtui and used as the "Up Next" queue.
    #[serde(default = "default_queue_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_volume_step")]
    pub volume_step: u8,
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: u64,
    #[serde(default = "default_playlist_cache_ttl_secs")]
    pub playlist_cache_ttl_secs: u64,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            application: default_application(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: default_queue_name(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            volume_step: default_volume_step(),
            seek_step_secs: default_seek_step_secs(),
            playlist_cache_ttl_secs: default_playlist_cache_ttl_secs(),
            search_limit: default_search_limit(),
        }
    }
}

fn default_program() -> String {
    "osascript".to_string()
}

fn default_application() -> String {
    "Music".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_queue_name() -> String {
    DEFAULT_QUEUE_NAME.to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_volume_step() -> u8 {
    10
}

fn default_seek_step_secs() -> u64 {
    10
}

fn default_playlist_cache_ttl_secs() -> u64 {
    30
}

fn default_search_limit() -> usize {
    crate::client::SEARCH_LIMIT
}

impl UiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }

    pub fn playlist_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.playlist_cache_ttl_secs)
    }
}

impl Config {
    /// Load from the default location, writing defaults when absent.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn script_context(&self) -> ScriptContext {
        ScriptContext {
            application: self.automation.application.clone(),
            queue_name: self.queue.name.clone(),
        }
    }
}
