//! Persistent CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use giftboard_core::db::SyncConfig;
use giftboard_core::util::{is_remote_database_url, normalize_text_option};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub sync_url: Option<String>,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Only ever read from the environment.
    #[serde(skip)]
    pub sync_token: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            sync_url: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            sync_token: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

const fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("giftboard")
        .join(CONFIG_FILE_NAME)
}

impl CliConfig {
    /// Load the config file and apply environment overrides.
    pub fn load() -> Result<Self, String> {
        let mut config = Self::load_from_path(&default_config_path())?;
        config.apply_env(
            std::env::var("GIFTBOARD_SYNC_URL").ok(),
            std::env::var("GIFTBOARD_SYNC_TOKEN").ok(),
        );
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        normalized.validate()?;
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Environment values win over the file.
    pub fn apply_env(&mut self, sync_url: Option<String>, sync_token: Option<String>) {
        if let Some(url) = normalize_text_option(sync_url) {
            self.sync_url = Some(url);
        }
        self.sync_token = normalize_text_option(sync_token);
    }

    /// Embedded-replica settings, when both URL and token are present.
    pub fn sync_config(&self) -> Option<SyncConfig> {
        let url = self.sync_url.clone()?;
        let token = self.sync_token.clone()?;
        Some(SyncConfig::new(url, token).with_sync_interval(self.refresh_interval()))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    fn normalize(&mut self) {
        self.sync_url = normalize_text_option(self.sync_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
        if self.refresh_interval_secs == 0 {
            self.refresh_interval_secs = DEFAULT_REFRESH_INTERVAL_SECS;
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self.sync_url.as_deref() {
            Some(url) if !is_remote_database_url(url) => Err(format!(
                "sync_url '{url}' is not a libsql://, https:// or wss:// URL"
            )),
            _ => Ok(()),
        }
    }
}
