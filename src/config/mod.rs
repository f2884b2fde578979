//! Configuration management for Marquee.
//!
//! Configuration is read from `~/.config/marquee/config.toml` at startup, or
//! from the path given with `--config`. If the file doesn't exist, a default
//! configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::Source;
use crate::fetcher::DEFAULT_USER_AGENT;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: Source,
    pub server: ServerConfig,
    pub fetcher: FetcherConfig,
    pub store: StoreConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP surface listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Client identity sent to the scraped site
    pub user_agent: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// When false, every update and API request fails with a storage error
    pub enabled: bool,
    /// Database file (default: `<data dir>/marquee/marquee.db`)
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Run the scheduled trigger alongside the HTTP server
    pub enabled: bool,
    /// Interval like "30m", "6h", "1d"
    pub interval: String,
    /// Run one update as soon as the scheduler starts
    pub update_on_start: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: "1d".to_string(),
            update_on_start: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the default config file doesn't exist, creates one with comments.
    /// An explicit path must exist. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/marquee/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("marquee").join("config.toml"))
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

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        format!(
            r##"# Marquee Configuration

# Chart to scrape: "flixpatrol" (top-10 tables, replaced on every update)
# or "trakt" (trending grid, merged with the previous snapshot)
source = "flixpatrol"

[server]
bind = "127.0.0.1:8787"

[fetcher]
user_agent = "{user_agent}"
timeout_secs = 30

[store]
enabled = true
# path = "/var/lib/marquee/marquee.db"

[schedule]
enabled = true
# Update interval (e.g., "30m", "6h", "1d")
interval = "1d"
update_on_start = false
"##,
            user_agent = DEFAULT_USER_AGENT
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

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
