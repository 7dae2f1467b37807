pub mod env;
pub mod journal;
pub mod metrics;
pub mod nav;
pub mod prefs;
pub mod services;
pub mod tutorial;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use es_core::config::Config;
use es_core::environment::{config_for, EnvironmentName, FeatureFlags};
use es_core::journal::JournalStore;
use es_core::metrics::MetricsStore;
use es_core::preferences::PreferencesStore;
use es_core::storage::FileStore;
use es_core::tutorial::ProgressTracker;
use serde::Serialize;

/// Everything a command needs: config, the resolved environment and the
/// shared on-disk store.
pub struct Context {
    pub config: Config,
    pub environment: EnvironmentName,
    store: Arc<FileStore>,
}

impl Context {
    /// `data_dir` takes precedence over `storage.data_dir` from the config.
    pub fn new(config: Config, data_dir: Option<PathBuf>, environment: EnvironmentName) -> Self {
        let store = match data_dir {
            Some(dir) => FileStore::new(dir),
            None => config.file_store(),
        };
        tracing::debug!(env = %environment, dir = %store.base_dir().display(), "context ready");
        Self {
            config,
            environment,
            store: Arc::new(store),
        }
    }

    pub fn flags(&self) -> FeatureFlags {
        config_for(self.environment).features
    }

    pub fn data_dir(&self) -> &Path {
        self.store.base_dir()
    }

    pub fn journal(&self) -> JournalStore<Arc<FileStore>> {
        JournalStore::new(self.store.clone())
    }

    pub fn tracker(&self) -> ProgressTracker<Arc<FileStore>> {
        ProgressTracker::new(self.store.clone())
    }

    pub fn metrics(&self) -> MetricsStore<Arc<FileStore>> {
        MetricsStore::with_capacity(self.store.clone(), self.config.metrics.max_samples)
    }

    pub fn preferences(&self) -> PreferencesStore<Arc<FileStore>> {
        PreferencesStore::new(self.store.clone())
    }
}

/// Strict environment-name parser for command-line flags.
pub fn parse_environment(raw: &str) -> Result<EnvironmentName, String> {
    EnvironmentName::parse(raw).ok_or_else(|| {
        let valid: Vec<_> = EnvironmentName::ALL.iter().map(|e| e.as_str()).collect();
        format!("unknown environment {raw:?} (expected one of: {})", valid.join(", "))
    })
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_environment_is_strict() {
        assert_eq!(parse_environment("prod"), Ok(EnvironmentName::Prod));
        let err = parse_environment("production").unwrap_err();
        assert!(err.contains("local, dev, test, prod"));
    }

    #[test]
    fn data_dir_flag_overrides_config() {
        let mut config = Config::default();
        config.storage.data_dir = Some("/from/config".into());

        let ctx = Context::new(config.clone(), None, EnvironmentName::Local);
        assert_eq!(ctx.data_dir(), Path::new("/from/config"));

        let ctx = Context::new(config, Some("/from/flag".into()), EnvironmentName::Local);
        assert_eq!(ctx.data_dir(), Path::new("/from/flag"));
    }

    #[test]
    fn write_artifact_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        write_artifact(&path, "[]").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
