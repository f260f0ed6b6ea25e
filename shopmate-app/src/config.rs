/// Configuration for the Shopmate app shell.
/// Reads config.json from the data directory (or platform equivalent).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use shopmate_core::config::{StoreKeys, DEFAULT_CURRENCY};

/// Overrides the data directory, e.g. an app group container on iOS.
pub const DATA_PATH_ENV: &str = "SHOPMATE_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub keys: StoreKeys,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keys: StoreKeys::default(),
            currency: default_currency(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Directory the store files live in.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// `$SHOPMATE_DATA_PATH`, else `<platform data dir>/shopmate`, else `.`
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::data_dir()
        .map(|dir| dir.join("shopmate"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default config path: <data dir>/config.json
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.json")
}

/// Load config from path. Returns default if file doesn't exist.
pub fn load_config(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("[shopmate.config] Failed to parse config {}: {}", path.display(), e);
            AppConfig::default()
        }),
        Err(_) => {
            log::info!("[shopmate.config] No config at {}, using defaults", path.display());
            AppConfig::default()
        }
    }
}
