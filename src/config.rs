//! Configuration for Bucketry.
//!
//! Settings come from a TOML file with `[server]`, `[display]` and `[logging]`
//! sections. Every key is optional and falls back to its default.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_COLUMN_GAP, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_ENV, MAX_COLUMN_GAP, MAX_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Console server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the console server, e.g. "http://localhost:9090"
    pub endpoint: String,
    /// Name of the environment variable holding the session token
    pub token_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Table display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print the column header row
    pub show_headers: bool,
    /// Spaces between columns
    pub column_gap: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write log records to the log file
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_headers: true,
            column_gap: DEFAULT_COLUMN_GAP,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the session token from the configured environment variable
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|token| !token.is_empty())
    }
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load the first configuration file found, or the defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Read, parse, and validate `path`
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
        let config: Config = toml::from_str(&raw).with_context(|| format!("Invalid TOML in {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Candidate files, most specific first: `./bucketry.toml`, then the XDG config directory
    fn config_candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Ok(dir) = Self::get_xdg_config_dir() {
            candidates.push(dir.join("config.toml"));
        }
        candidates
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::config_candidates().into_iter().find(|path| path.is_file())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let endpoint = reqwest::Url::parse(&self.server.endpoint)
            .with_context(|| format!("Invalid server endpoint '{}'", self.server.endpoint))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            anyhow::bail!(
                "server endpoint must use http or https, got '{}'",
                endpoint.scheme()
            );
        }

        if self.server.token_env.is_empty() {
            anyhow::bail!("server.token_env cannot be empty");
        }

        if self.server.timeout_secs == 0 || self.server.timeout_secs > MAX_TIMEOUT_SECS {
            anyhow::bail!(
                "timeout_secs must be between 1 and {}, got {}",
                MAX_TIMEOUT_SECS,
                self.server.timeout_secs
            );
        }

        if self.display.column_gap > MAX_COLUMN_GAP {
            anyhow::bail!("column_gap cannot exceed {}", MAX_COLUMN_GAP);
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Override the server endpoint, e.g. from a command line flag
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            self.server.endpoint = endpoint;
            self.validate()?;
        }
        Ok(self)
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let body = toml::to_string_pretty(&Self::default()).context("Cannot serialize the default configuration")?;
        let content = format!(
            "# Bucketry Configuration File\n# Generated on {}\n\n{}",
            chrono::Local::now().format("%Y-%m-%d"),
            body
        );

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        std::fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
