use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::client::cover::{DEFAULT_COVERS_URL, PLACEHOLDER_COVER_URL};
use crate::client::open_library::{DEFAULT_BASE_URL, DEFAULT_SEARCH_LIMIT};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BookFinderConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_covers_url")]
    pub covers_url: String,
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_covers_url() -> String {
    DEFAULT_COVERS_URL.to_string()
}

fn default_placeholder_url() -> String {
    PLACEHOLDER_COVER_URL.to_string()
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            covers_url: default_covers_url(),
            placeholder_url: default_placeholder_url(),
            search_limit: default_search_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    "./data/book_finder".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config: {0}")]
    Read(#[source] std::io::Error),
    #[error("Error parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Could not write default config: {0}")]
    Write(#[source] std::io::Error),
}

/// How `load_or_default` arrived at its config.
#[derive(Debug)]
pub enum ConfigStatus {
    Loaded,
    CreatedDefault,
    /// Defaults are in use because of the error.
    Fallback(ConfigError),
}

impl ConfigStatus {
    /// Report through tracing. Call once a subscriber is installed.
    pub fn log(&self, path: &str) {
        match self {
            ConfigStatus::Loaded => info!("Config loaded from {}", path),
            ConfigStatus::CreatedDefault => {
                info!("Config file not found at '{}'. Created default.", path)
            }
            ConfigStatus::Fallback(e) => warn!("{} ({}). Using defaults.", e, path),
        }
    }
}

impl BookFinderConfig {
    pub fn load_or_default(path: &str) -> (Self, ConfigStatus) {
        if std::path::Path::new(path).exists() {
            match Self::load(path) {
                Ok(c) => (c, ConfigStatus::Loaded),
                Err(e) => (Self::default(), ConfigStatus::Fallback(e)),
            }
        } else {
            let config = Self::default();
            match config.write(path) {
                Ok(()) => (config, ConfigStatus::CreatedDefault),
                Err(e) => (config, ConfigStatus::Fallback(e)),
            }
        }
    }

    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn write(&self, path: &str) -> Result<(), ConfigError> {
        let s = toml::to_string_pretty(self)?;
        std::fs::write(path, s).map_err(ConfigError::Write)
    }
}
