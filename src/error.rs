use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Permission denied opening log file '{}': {source}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid logging configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("A global tracing subscriber is already installed: {0}")]
    SubscriberAlreadySet(String),

    #[error("A sink is already attached to this logger registry")]
    SinkAlreadyAttached,
}

impl LoggingError {
    /// Classify an I/O failure on `path`, keeping permission problems distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path, source }
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
