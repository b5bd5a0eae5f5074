//! Configuration: which worlds are governed by regeneration, and how long
//! temporary flags last.
//!
//! # Layout
//! ```yaml
//! worlds:
//!   - world
//!   - world_nether
//! flag-duration-minutes: 10080
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_FLAG_DURATION_MINUTES: u64 = 60 * 24 * 7;

/// One hundred years.
pub const MAX_FLAG_DURATION_MINUTES: u64 = 60 * 24 * 365 * 100;

/// Read-only lookup of the worlds flag commands may touch.
pub trait EnabledWorlds {
    /// Governed world names, in configuration order and configured casing.
    fn enabled_worlds(&self) -> &[String];
}

impl EnabledWorlds for Vec<String> {
    fn enabled_worlds(&self) -> &[String] {
        self
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no worlds are enabled; list at least one under `worlds`")]
    NoWorlds,
    #[error("flag-duration-minutes {0} is out of range")]
    FlagDurationOutOfRange(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegenConfig {
    #[serde(default = "default_worlds")]
    pub worlds: Vec<String>,
    #[serde(default = "default_flag_duration_minutes")]
    pub flag_duration_minutes: u64,
}

fn default_worlds() -> Vec<String> {
    vec!["world".to_owned()]
}

fn default_flag_duration_minutes() -> u64 {
    DEFAULT_FLAG_DURATION_MINUTES
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            worlds: default_worlds(),
            flag_duration_minutes: default_flag_duration_minutes(),
        }
    }
}

impl RegenConfig {
    /// Parse configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            worlds = config.worlds.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Write configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// How long a temporary flag lasts.
    pub fn flag_duration(&self) -> Duration {
        Duration::from_secs(self.flag_duration_minutes.saturating_mul(60))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.worlds.is_empty() {
            return Err(ConfigError::NoWorlds);
        }
        if self.flag_duration_minutes > MAX_FLAG_DURATION_MINUTES {
            return Err(ConfigError::FlagDurationOutOfRange(self.flag_duration_minutes));
        }
        Ok(())
    }
}

impl EnabledWorlds for RegenConfig {
    fn enabled_worlds(&self) -> &[String] {
        &self.worlds
    }
}
