mod format;
mod init;
mod sink;

pub use format::{level_name, RecordFormat, LOGGER_FIELD, TIMESTAMP_FORMAT};
pub use init::{build_file_layer, init_logging, shutdown_logging};
pub use sink::RotatingFileSink;

use std::path::Path;
use std::sync::OnceLock;

use crate::config::LogConfig;

/// Default `RUST_LOG` directives for the stderr diagnostics layer.
pub const DEFAULT_DIAGNOSTICS_FILTER: &str = "logsetup=warn,logsetup::record=off";

/// Configuration of the successful initialization, set once.
static ACTIVE_CONFIG: OnceLock<LogConfig> = OnceLock::new();

/// Whether `init_logging` has completed in this process.
#[must_use]
pub fn is_initialized() -> bool {
    ACTIVE_CONFIG.get().is_some()
}

/// Path of the active log file, once logging is initialized.
#[must_use]
pub fn log_file_path() -> Option<&'static Path> {
    ACTIVE_CONFIG.get().map(|c| c.log_file.as_path())
}

/// The configuration logging was initialized with.
#[must_use]
pub fn active_config() -> Option<&'static LogConfig> {
    ACTIVE_CONFIG.get()
}
