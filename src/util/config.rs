//! Configuration file support for petposter.
//!
//! Two configuration file locations are read:
//! - Global: `<config dir>/config.toml` - User-wide defaults
//! - Project: `.petposter/config.toml` - Directory-specific overrides
//!
//! Project config takes precedence over global config. The stored data
//! version is not configurable; see [`crate::core::DATA_VERSION`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default storage key for the draft.
pub const DEFAULT_STORAGE_KEY: &str = "petPosterFormData";

/// petposter configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draft persistence settings
    pub store: StoreConfig,
}

/// Draft persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the draft envelope is stored under
    pub storage_key: String,

    /// Quiet period before a save is written
    pub debounce_ms: u64,

    /// Read attempts before loading gives up
    pub load_attempts: u32,

    /// Delay between read attempts
    pub retry_delay_ms: u64,

    /// Size cap for the file-backed storage (None = unlimited)
    pub quota_bytes: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            debounce_ms: 300,
            load_attempts: 3,
            retry_delay_ms: 1000,
            quota_bytes: None,
        }
    }
}

impl StoreConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// A config file with every field optional, used for merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartialConfig {
    store: PartialStoreConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartialStoreConfig {
    storage_key: Option<String>,
    debounce_ms: Option<u64>,
    load_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
    quota_bytes: Option<u64>,
}

impl Config {
    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;
        crate::util::fs::write_string(path, &contents)
    }

    /// Merge a partial config into this one (other takes precedence).
    fn merge(&mut self, other: PartialConfig) {
        let store = other.store;
        if let Some(key) = store.storage_key {
            self.store.storage_key = key;
        }
        if let Some(ms) = store.debounce_ms {
            self.store.debounce_ms = ms;
        }
        if let Some(attempts) = store.load_attempts {
            self.store.load_attempts = attempts;
        }
        if let Some(ms) = store.retry_delay_ms {
            self.store.retry_delay_ms = ms;
        }
        if store.quota_bytes.is_some() {
            self.store.quota_bytes = store.quota_bytes;
        }
    }
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.petposter/config.toml)
/// 2. Global config (<config dir>/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    for path in global_path.into_iter().chain(std::iter::once(project_path)) {
        if !path.exists() {
            continue;
        }
        match read_partial(path) {
            Ok(partial) => config.merge(partial),
            Err(e) => tracing::warn!("Ignoring config {}: {:#}", path.display(), e),
        }
    }

    config
}

/// Get the project config path (.petposter/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".petposter").join("config.toml")
}
