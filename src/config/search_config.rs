//! Searcher configuration parsing
//!
//! Loads service configuration from YAML and provides strongly-typed
//! access to result limits, refresh behavior and the record source.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::limits::ResultLimits;

/// Root configuration structure for the sanctions searcher
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub limits: ResultLimits,
    #[serde(default)]
    pub refresh: RefreshConfig,
    pub source: SourceConfig,
}

/// Configuration for dataset refresh behavior
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default)]
    pub startup_mode: StartupMode,
}

fn default_interval_secs() -> u64 {
    12 * 60 * 60
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            startup_mode: StartupMode::default(),
        }
    }
}

/// Startup mode for the initial dataset load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupMode {
    /// Load in the background (queries return nothing until ready)
    Async,
    /// Load before serving
    #[default]
    Sync,
}

/// Where raw watchlist records come from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// JSON document holding `sdns`, `addresses` and `alternateIdentities`
    pub path: PathBuf,
}

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl SearchConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.soft == 0 {
            return Err(ConfigError::Invalid("limits.soft must be at least 1".into()));
        }
        if self.limits.soft > self.limits.hard {
            return Err(ConfigError::Invalid(format!(
                "limits.soft ({}) exceeds limits.hard ({})",
                self.limits.soft, self.limits.hard
            )));
        }
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh.interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
