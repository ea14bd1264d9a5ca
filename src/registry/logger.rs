use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use super::LoggerRegistry;

/// Target of every record emitted through a [`Logger`]. The file layer
/// accepts only this target.
pub const RECORD_TARGET: &str = "logsetup::record";

/// A named handle into a [`LoggerRegistry`].
///
/// Handles are cheap to clone and hold no sink of their own. Records are
/// emitted as `tracing` events carrying the name in the `logger` field.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    registry: Arc<LoggerRegistry>,
}

impl Logger {
    pub(super) fn new(name: &str, registry: Arc<LoggerRegistry>) -> Self {
        Self {
            name: name.to_string(),
            registry,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the threshold for this name. Shared by every handle with the
    /// same name.
    pub fn set_level(&self, level: LevelFilter) {
        self.registry.set_level(&self.name, level);
    }

    #[must_use]
    pub fn level(&self) -> Option<LevelFilter> {
        self.registry.level_of(&self.name)
    }

    #[must_use]
    pub fn effective_level(&self) -> LevelFilter {
        self.registry.effective_level(&self.name)
    }

    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level <= self.effective_level()
    }

    pub fn log(&self, level: Level, message: &str) {
        if !self.is_enabled_for(level) {
            return;
        }
        let logger = self.name.as_str();
        match level {
            Level::TRACE => tracing::trace!(target: RECORD_TARGET, logger, "{message}"),
            Level::DEBUG => tracing::debug!(target: RECORD_TARGET, logger, "{message}"),
            Level::INFO => tracing::info!(target: RECORD_TARGET, logger, "{message}"),
            Level::WARN => tracing::warn!(target: RECORD_TARGET, logger, "{message}"),
            _ => tracing::error!(target: RECORD_TARGET, logger, "{message}"),
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::TRACE, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}
