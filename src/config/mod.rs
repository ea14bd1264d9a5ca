//! Logging configuration.
//!
//! Defaults reproduce the canonical setup: `app.log` in the working
//! directory, rotated at 100 MiB, ten backups kept, opened for append.
//! Values may come from a TOML file and are overridden by the CLI.

mod loader;
pub use loader::load_config;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::error::LoggingError;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "app.log";
/// Default rotation threshold (100 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;
/// Default number of rotated backups kept.
pub const DEFAULT_BACKUP_COUNT: usize = 10;
/// Upper bound on `backup_count`.
pub const MAX_BACKUP_COUNT: usize = 1000;

/// How the active log file is opened at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    /// Keep existing content and append to it.
    #[default]
    Append,
    /// Discard existing content.
    Truncate,
}

impl FromStr for OpenMode {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "append" => Ok(Self::Append),
            "w" | "truncate" => Ok(Self::Truncate),
            other => Err(LoggingError::InvalidConfig(format!(
                "unknown open mode '{other}' (expected append or truncate)"
            ))),
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => f.write_str("append"),
            Self::Truncate => f.write_str("truncate"),
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

const fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

const fn default_backup_count() -> usize {
    DEFAULT_BACKUP_COUNT
}

fn default_root_level() -> String {
    "warn".to_string()
}

/// Configuration for the process-wide rotating file sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
    #[serde(default)]
    pub mode: OpenMode,
    /// Threshold for loggers that never set their own level.
    #[serde(default = "default_root_level")]
    pub root_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            mode: OpenMode::Append,
            root_level: default_root_level(),
        }
    }
}

impl LogConfig {
    /// Check the values before anything touches the filesystem.
    pub fn validate(&self) -> Result<(), LoggingError> {
        if self.log_file.as_os_str().is_empty() {
            return Err(LoggingError::InvalidConfig(
                "log_file must not be empty".to_string(),
            ));
        }
        if self.log_file.is_dir() {
            return Err(LoggingError::InvalidConfig(format!(
                "log_file '{}' is a directory",
                self.log_file.display()
            )));
        }
        if self.max_bytes == 0 {
            return Err(LoggingError::InvalidConfig(
                "max_bytes must be greater than zero".to_string(),
            ));
        }
        if self.backup_count > MAX_BACKUP_COUNT {
            return Err(LoggingError::InvalidConfig(format!(
                "backup_count {} exceeds the maximum of {MAX_BACKUP_COUNT}",
                self.backup_count
            )));
        }
        self.root_level_filter()?;
        Ok(())
    }

    /// Parse `root_level` into a filter.
    pub fn root_level_filter(&self) -> Result<LevelFilter, LoggingError> {
        parse_level(&self.root_level)
    }
}

/// Parse a level name (`trace`..`error`, or `off`).
pub fn parse_level(s: &str) -> Result<LevelFilter, LoggingError> {
    LevelFilter::from_str(s.trim())
        .map_err(|_| LoggingError::InvalidConfig(format!("unknown log level '{s}'")))
}
