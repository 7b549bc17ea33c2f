//! Logging setup built on the `log` facade and `fern`.
//!
//! Records go to a log file under the user's data directory when logging is
//! enabled in the configuration, and to stderr when verbose output is requested.

use crate::config::LoggingConfig;
use crate::constants::{APP_NAME, LOG_FILE_NAME};
use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::PathBuf;

/// Logging sinks resolved from configuration
#[derive(Debug, Clone)]
pub struct Logger {
    enabled: bool,
    level: LevelFilter,
    log_file: Option<PathBuf>,
    stderr: bool,
}

impl Logger {
    /// Build a logger from the `[logging]` config section
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let level = config.level_filter()?;
        let log_file = if config.enabled {
            Some(Self::get_log_file_path()?)
        } else {
            None
        };

        Ok(Self {
            enabled: config.enabled,
            level,
            log_file,
            stderr: false,
        })
    }

    /// Also echo records to stderr at debug level
    pub fn with_stderr(mut self, verbose: bool) -> Self {
        self.stderr = verbose;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Install the global logger.
    ///
    /// Does nothing when neither the file nor stderr sink is active. Installing
    /// twice in one process keeps the first dispatcher.
    pub fn install(&self) -> Result<()> {
        if self.log_file.is_none() && !self.stderr {
            return Ok(());
        }

        // The root filter must pass everything a child wants; children narrow it
        let root_level = if self.stderr {
            self.level.max(LevelFilter::Debug)
        } else {
            self.level
        };
        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}",
                    Self::format_line(&chrono::Local::now(), record.level(), record.target(), message)
                ))
            })
            .level(LevelFilter::Warn)
            .level_for(APP_NAME, root_level);

        if let Some(path) = &self.log_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .level(LevelFilter::Warn)
                    .level_for(APP_NAME, self.level)
                    .chain(file),
            );
        }

        if self.stderr {
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .level(LevelFilter::Warn)
                    .level_for(APP_NAME, LevelFilter::Debug)
                    .chain(std::io::stderr()),
            );
        }

        if dispatch.apply().is_err() {
            log::debug!("Logger already installed, keeping the existing one");
        }
        Ok(())
    }

    /// Format one log line
    pub fn format_line(
        timestamp: &chrono::DateTime<chrono::Local>,
        level: log::Level,
        target: &str,
        message: &std::fmt::Arguments,
    ) -> String {
        format!("[{}] {:<5} {}: {}", timestamp.format("%Y-%m-%d %H:%M:%S%.3f"), level, target, message)
    }

    /// Path of the log file
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_NAME).join(LOG_FILE_NAME))
    }
}
