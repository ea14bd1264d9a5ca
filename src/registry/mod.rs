//! Process-wide logger registry.
//!
//! Ordinary components only look loggers up by name. Attaching the sink is
//! reserved for the startup path in [`crate::logging`], and a registry
//! accepts exactly one sink for its lifetime.

mod logger;
pub use logger::{Logger, RECORD_TARGET};

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::level_filters::LevelFilter;

use crate::error::LoggingError;
use crate::logging::RotatingFileSink;

static GLOBAL_REGISTRY: Lazy<Arc<LoggerRegistry>> = Lazy::new(|| Arc::new(LoggerRegistry::new()));

/// The process-wide registry.
#[must_use]
pub fn registry() -> &'static Arc<LoggerRegistry> {
    &GLOBAL_REGISTRY
}

/// Look up a logger by name in the process-wide registry.
#[must_use]
pub fn get_logger(name: &str) -> Logger {
    GLOBAL_REGISTRY.get_logger(name)
}

/// Mapping from logger name to severity threshold, plus the single sink.
#[derive(Debug)]
pub struct LoggerRegistry {
    levels: RwLock<HashMap<String, Option<LevelFilter>>>,
    root_level: RwLock<LevelFilter>,
    sink: OnceLock<Arc<RotatingFileSink>>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: RwLock::new(HashMap::new()),
            root_level: RwLock::new(LevelFilter::WARN),
            sink: OnceLock::new(),
        }
    }

    /// Return a handle for `name`, registering the name on first lookup.
    ///
    /// Repeated lookups share one threshold entry and never touch the sink.
    #[must_use]
    pub fn get_logger(self: &Arc<Self>, name: &str) -> Logger {
        {
            let mut levels = self
                .levels
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            levels.entry(name.to_string()).or_insert(None);
        }
        Logger::new(name, Arc::clone(self))
    }

    /// Names looked up so far, sorted.
    #[must_use]
    pub fn logger_names(&self) -> Vec<String> {
        let levels = self
            .levels
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut names: Vec<String> = levels.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn root_level(&self) -> LevelFilter {
        *self
            .root_level
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn set_root_level(&self, level: LevelFilter) {
        *self
            .root_level
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = level;
    }

    /// Explicit threshold set for `name`, if any.
    #[must_use]
    pub fn level_of(&self, name: &str) -> Option<LevelFilter> {
        self.levels
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(name)
            .copied()
            .flatten()
    }

    /// Threshold for `name`, inheriting the root threshold when unset.
    #[must_use]
    pub fn effective_level(&self, name: &str) -> LevelFilter {
        self.level_of(name).unwrap_or_else(|| self.root_level())
    }

    pub(crate) fn set_level(&self, name: &str, level: LevelFilter) {
        self.levels
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(name.to_string(), Some(level));
    }

    /// Attach the sink. Only the startup path calls this.
    pub(crate) fn attach_sink(&self, sink: Arc<RotatingFileSink>) -> Result<(), LoggingError> {
        self.sink
            .set(sink)
            .map_err(|_| LoggingError::SinkAlreadyAttached)
    }

    /// The sink attached at startup.
    ///
    /// Records do not flow through this handle: `Logger` emits `tracing`
    /// events and the installed subscriber's file layer writes them. The
    /// registry keeps the handle so teardown can flush and close the file.
    #[must_use]
    pub fn sink(&self) -> Option<&Arc<RotatingFileSink>> {
        self.sink.get()
    }

    /// Whether the startup path has attached its sink.
    #[must_use]
    pub fn has_sink(&self) -> bool {
        self.sink.get().is_some()
    }

    /// Flush and close the attached sink; a no-op without one.
    pub fn close_sink(&self) -> Result<(), LoggingError> {
        match self.sink.get() {
            Some(sink) => sink
                .close()
                .map_err(|e| LoggingError::from_io(sink.path(), e)),
            None => Ok(()),
        }
    }
}
