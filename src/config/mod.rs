//! Configuration management for goodthings.
//!
//! Configuration is read from `~/.config/goodthings/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::comment::http_provider::DEFAULT_TIMEOUT_SECS;

/// Environment variable overriding `comments.endpoint`.
pub const ENDPOINT_ENV: &str = "GOODTHINGS_API_ENDPOINT";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub comments: CommentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database name; the file is `<data dir>/goodthings/<namespace>.db`.
    pub namespace: String,
    /// Explicit database path, overriding `namespace`.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: "3GoodThingsDB".to_string(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Base URL of the comment proxy.
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Run a comment pass right after saving a day.
    pub auto_comment: bool,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_comment: true,
        }
    }
}

impl CommentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
                path: config_path.clone(),
                source: e,
            })?;

            Self::parse(&content).map_err(|e| ConfigError::Parse {
                path: config_path,
                source: e,
            })?
        } else {
            Self::create_default_config(&config_path)?;
            Self::default()
        };

        config.apply_env(std::env::var(ENDPOINT_ENV).ok());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_env(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.comments.endpoint = endpoint;
        }
    }

    /// Get the default config file path: `~/.config/goodthings/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("goodthings").join("config.toml"))
    }

    /// Resolve the database file path.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.storage.path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        let dir = data_dir.join("goodthings");
        fs::create_dir_all(&dir).map_err(|e| ConfigError::Io {
            path: dir.clone(),
            source: e,
        })?;
        Ok(dir.join(format!("{}.db", self.storage.namespace)))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# goodthings configuration

[storage]
# Database name. The file lives in the platform data directory as
# goodthings/<namespace>.db
namespace = "3GoodThingsDB"

# Uncomment to store the database somewhere else
# path = "/path/to/journal.db"

[comments]
# Base URL of the comment proxy (requests go to <endpoint>/api/comment).
# Can also be set with GOODTHINGS_API_ENDPOINT.
endpoint = "http://localhost:8787"

# Request timeout in seconds
timeout_secs = 10

# Ask for comments right after saving the day's items
auto_comment = true
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<ConfigError> for crate::app::JournalError {
    fn from(e: ConfigError) -> Self {
        crate::app::JournalError::Config(e.to_string())
    }
}
