//! Store configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Engine name; also the snapshot file stem.
    #[serde(default = "default_name")]
    pub name: String,

    /// Directory for the on-disk snapshot. `None` keeps the engine purely
    /// in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Creates an in-memory configuration with the given engine name.
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_dir: None,
        }
    }

    /// Creates a durable configuration snapshotting under `data_dir`.
    pub fn durable(name: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            data_dir: Some(data_dir.into()),
        }
    }

    /// Full path of the snapshot file, when one is configured.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", self.name)))
    }

    /// Validate store configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyStoreName);
        }
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(ValidationError::EmptyDataDir);
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: None,
        }
    }
}

fn default_name() -> String {
    "eunoia".to_string()
}
