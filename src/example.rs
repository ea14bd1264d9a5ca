//! A component that is constructed many times and logs once per
//! construction. It only looks its logger up; the sink is attached by
//! [`crate::logging::init_logging`] at startup.

use std::sync::Arc;
use tracing::level_filters::LevelFilter;

use crate::registry::{self, Logger, LoggerRegistry};

/// Name of the logger used by [`Example`].
pub const EXAMPLE_LOGGER: &str = "example_logger";

/// Message written once per construction.
pub const INSTANCE_CREATED_MESSAGE: &str = "A new instance of the example has been created";

#[derive(Debug, Clone)]
pub struct Example {
    logger: Logger,
}

impl Default for Example {
    fn default() -> Self {
        Self::new()
    }
}

impl Example {
    /// Construct against the process-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(registry::registry())
    }

    /// Construct against an explicit registry.
    #[must_use]
    pub fn with_registry(registry: &Arc<LoggerRegistry>) -> Self {
        let logger = registry.get_logger(EXAMPLE_LOGGER);
        logger.set_level(LevelFilter::INFO);
        logger.info(INSTANCE_CREATED_MESSAGE);
        Self { logger }
    }

    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }
}

#[cfg(test)]
#[path = "example_tests.rs"]
mod example_tests;
