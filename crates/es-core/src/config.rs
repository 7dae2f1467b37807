use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::environment::{app_display_name_from, APP_NAME_VAR, DEFAULT_APP_NAME};
use crate::metrics::DEFAULT_MAX_SAMPLES;
use crate::services::DEV_SERVER_PORT;
use crate::storage::FileStore;

/// Top-level configuration loaded from `~/.env-stamp/config.toml`.
///
/// The environment itself is not configurable here; it always comes from
/// `APP_ENV`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub services: ServicesConfig,
}

impl Config {
    /// Load config from `~/.env-stamp/config.toml`, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(path)
        } else {
            let cfg = Config::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let cfg: Config = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `APP_NAME` on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_app_name(std::env::var(APP_NAME_VAR).ok().as_deref())
    }

    /// Replace `general.app_name` when `name` is set and non-blank.
    pub fn with_app_name(mut self, name: Option<&str>) -> Self {
        if name.is_some_and(|n| !n.trim().is_empty()) {
            self.general.app_name = app_display_name_from(name);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.sample_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "metrics.sample_interval_secs must be greater than zero".into(),
            ));
        }
        if self.metrics.max_samples == 0 {
            return Err(ConfigError::Validation(
                "metrics.max_samples must be greater than zero".into(),
            ));
        }
        if self.services.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "services.probe_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// The store selected by `storage.data_dir`, or the platform default.
    pub fn file_store(&self) -> FileStore {
        match &self.storage.data_dir {
            Some(dir) => FileStore::new(dir),
            None => FileStore::default_path(),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".env-stamp")
            .join("config.toml")
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.into()
}
fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key.
    #[serde(default)]
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            sample_interval_secs: default_sample_interval_secs(),
            max_samples: default_max_samples(),
        }
    }
}

fn default_sample_interval_secs() -> u64 {
    30
}
fn default_max_samples() -> usize {
    DEFAULT_MAX_SAMPLES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_probe_ports")]
    pub probe_ports: Vec<u16>,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            probe_ports: default_probe_ports(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

fn default_probe_ports() -> Vec<u16> {
    vec![DEV_SERVER_PORT, 3000, 3001, 4000, 4173, 8000, 8080, 8081]
}
fn default_probe_timeout_ms() -> u64 {
    1500
}
