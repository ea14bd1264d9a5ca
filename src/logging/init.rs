use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::{RecordFormat, RotatingFileSink, ACTIVE_CONFIG, DEFAULT_DIAGNOSTICS_FILTER};
use crate::config::{LogConfig, OpenMode};
use crate::error::LoggingError;
use crate::registry::{registry, LoggerRegistry, RECORD_TARGET};

/// Serializes initialization so two callers cannot both attach.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// File layer: records emitted through `Logger` handles, one line each.
pub fn build_file_layer<S>(sink: Arc<RotatingFileSink>) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .event_format(RecordFormat)
        .with_ansi(false)
        .with_writer(sink)
        .with_filter(filter_fn(|metadata| metadata.target() == RECORD_TARGET))
}

/// Initialize process-wide logging.
///
/// Opens the rotating sink, attaches it to the global registry and
/// installs the global `tracing` subscriber. Runs at most once per
/// process: later calls return the already-configured registry without
/// opening or attaching anything.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot
/// be opened, or another global subscriber is already installed. Nothing
/// is attached in that case.
pub fn init_logging(config: &LogConfig) -> Result<&'static Arc<LoggerRegistry>, LoggingError> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(active) = ACTIVE_CONFIG.get() {
        if active != config {
            warn!(
                active = %active.log_file.display(),
                requested = %config.log_file.display(),
                "Logging already initialized; ignoring new configuration"
            );
        }
        return Ok(registry());
    }

    config.validate()?;
    let root_level = config.root_level_filter()?;
    if tracing::dispatcher::has_been_set() {
        return Err(LoggingError::SubscriberAlreadySet(
            "a global default dispatcher was set before logging initialization".to_string(),
        ));
    }
    // Open for append; existing content is only discarded once the
    // subscriber is in place.
    let sink = Arc::new(RotatingFileSink::open(
        &config.log_file,
        config.max_bytes,
        config.backup_count,
        OpenMode::Append,
    )?);

    let diagnostics_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIAGNOSTICS_FILTER));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(diagnostics_filter);

    tracing_subscriber::registry()
        .with(build_file_layer(Arc::clone(&sink)))
        .with(stderr_layer)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| LoggingError::SubscriberAlreadySet(e.to_string()))?;

    if config.mode == OpenMode::Truncate {
        sink.truncate().map_err(|e| LoggingError::from_io(sink.path(), e))?;
    }

    let registry = registry();
    registry.set_root_level(root_level);
    registry.attach_sink(sink)?;
    let _ = ACTIVE_CONFIG.set(config.clone());

    debug!(
        path = %config.log_file.display(),
        max_bytes = config.max_bytes,
        backup_count = config.backup_count,
        mode = %config.mode,
        "Logging initialized"
    );
    Ok(registry)
}

/// Flush and close the sink. Safe to call when logging was never
/// initialized.
///
/// # Errors
///
/// Returns an error if the final flush fails.
pub fn shutdown_logging() -> Result<(), LoggingError> {
    registry().close_sink()
}
