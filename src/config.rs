use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use thiserror::Error;

pub(crate) const DATA_DIR_VAR: &str = "HISABKITAB_DATA_DIR";
pub(crate) const SAVE_DELAY_VAR: &str = "HISABKITAB_SAVE_DELAY_MS";
pub(crate) const LOG_VAR: &str = "HISABKITAB_LOG";

const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_LOG_FILTER: &str = "hisabkitab=info";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Could not determine data directory")]
    NoDataDir,
    #[error("HISABKITAB_SAVE_DELAY_MS must be a whole number of milliseconds, got '{0}'")]
    InvalidSaveDelay(String),
}

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) save_delay: Duration,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => directories::ProjectDirs::from("com", "hisabkitab", "HisabKitab")
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };

        let save_delay = match lookup(SAVE_DELAY_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidSaveDelay(raw))?,
            None => DEFAULT_SAVE_DELAY,
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_dir,
            save_delay,
            log_filter,
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("hisabkitab.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("hisabkitab.log")
    }

    pub(crate) fn ensure_data_dir(&self) -> anyhow::Result<&Path> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;
        Ok(&self.data_dir)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
