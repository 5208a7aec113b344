//! Configuration for the tweak store

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tweak store configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Namespace of the persisted key-space; names the JSON file on disk
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// When false every tweak reads as its default
    #[serde(default = "default_true")]
    pub editing_enabled: bool,

    /// Directory holding persisted overrides; in-memory persistence when absent
    #[serde(default)]
    pub persistence_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            editing_enabled: true,
            persistence_dir: None,
        }
    }
}

impl Config {
    pub fn with_store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self
    }

    pub fn with_editing_enabled(mut self, editing_enabled: bool) -> Self {
        self.editing_enabled = editing_enabled;
        self
    }

    pub fn with_persistence_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.persistence_dir = Some(dir.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// The store name must be usable as a file name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name cannot be empty".to_string()));
        }

        if self.store_name.contains(['/', '\\'])
            || self.store_name == "."
            || self.store_name == ".."
        {
            return Err(ConfigError::Invalid(format!(
                "store_name '{}' cannot contain path separators",
                self.store_name
            )));
        }

        Ok(())
    }

    /// `<persistence_dir>/<store_name>.json`, when a directory is configured
    pub fn persistence_path(&self) -> Option<PathBuf> {
        self.persistence_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", self.store_name)))
    }
}

fn default_store_name() -> String {
    "Tweaks".to_string()
}

fn default_true() -> bool {
    true
}
