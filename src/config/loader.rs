use std::path::Path;
use tracing::debug;

use super::LogConfig;
use crate::error::LoggingError;

/// Load a [`LogConfig`] from a TOML file.
///
/// Missing keys take their defaults. The result is not validated here;
/// `init_logging` validates before opening the sink.
///
/// # Errors
///
/// Returns [`LoggingError`] if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<LogConfig, LoggingError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| LoggingError::from_io(path, e))?;
    let config: LogConfig =
        toml::from_str(&content).map_err(|source| LoggingError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Loaded logging config from {}", path.display());
    Ok(config)
}
