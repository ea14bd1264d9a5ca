//! Process-wide rotating file logging, attached once.
//!
//! [`logging::init_logging`] opens a size-rotating sink and attaches it to
//! the process-wide registry exactly once. Components such as
//! [`example::Example`] only look up named [`registry::Logger`] handles, so
//! constructing them any number of times never duplicates sinks or lines.
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod error;
pub mod example;
pub mod logging;
pub mod registry;

pub use config::{load_config, LogConfig, OpenMode};
pub use error::LoggingError;
pub use example::{Example, EXAMPLE_LOGGER, INSTANCE_CREATED_MESSAGE};
pub use logging::{init_logging, shutdown_logging, RotatingFileSink};
pub use registry::{get_logger, Logger, LoggerRegistry};
