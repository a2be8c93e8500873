// Service configuration - which datasets to open and which schema each follows
//
// Stored as camelCase JSON. The defaults reproduce the stock deployment:
// the current Remède dataset plus the 1.2.3 legacy one under `data/`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::turso::DatasetVariant;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "REMEDE_CONFIG";

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// One dataset entry of the registry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetConfig {
    /// Identifier used to select the dataset (e.g. "remede.legacy")
    pub slug: String,
    /// Display name
    pub name: String,
    /// Database file, relative to `data_dir` unless absolute
    pub file: PathBuf,
    #[serde(default)]
    pub variant: DatasetVariant,
    /// JSON schema file, relative to `data_dir` unless absolute
    pub schema: PathBuf,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// First entry is the primary dataset
    pub datasets: Vec<DatasetConfig>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            datasets: vec![
                DatasetConfig {
                    slug: "remede".to_string(),
                    name: "Remède (FR)".to_string(),
                    file: PathBuf::from("data/remede.db"),
                    variant: DatasetVariant::Current,
                    schema: PathBuf::from("docs/1.2.3.schema.json"),
                },
                DatasetConfig {
                    slug: "remede.legacy".to_string(),
                    name: "Remède 1.2.3 (FR)".to_string(),
                    file: PathBuf::from("data/remede.legacy.db"),
                    variant: DatasetVariant::Legacy,
                    schema: PathBuf::from("docs/1.2.3.schema.json"),
                },
            ],
        }
    }
}

impl ServiceConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        crate::debug!("Loading config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `REMEDE_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                crate::debug!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    /// Resolve a configured path against `data_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
