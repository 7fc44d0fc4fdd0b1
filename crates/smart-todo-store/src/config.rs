use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smart_todo_core::draft::ValidationPolicy;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CONFIG_VERSION: u32 = 1;

/// Workspace settings stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub validation: ValidationPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            validation: ValidationPolicy::default(),
            created_at: None,
        }
    }
}

impl Config {
    /// Read the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
