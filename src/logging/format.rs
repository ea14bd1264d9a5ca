//! Line format for records written to the sink:
//! `<timestamp> <logger-name> <LEVEL> <message>`.

use chrono::Local;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Field carrying the logger name on every record.
pub const LOGGER_FIELD: &str = "logger";

/// Timestamp layout, e.g. `2024-05-01 09:30:12,045`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Formats one record per line. The logger name comes from the `logger`
/// field, falling back to the event target.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormat;

/// Level name as written to the file. `WARN` is spelled `WARNING`.
#[must_use]
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        _ => "ERROR",
    }
}

#[derive(Default)]
struct RecordVisitor {
    logger: Option<String>,
    message: String,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            LOGGER_FIELD => self.logger = Some(value.to_string()),
            "message" => self.message.push_str(value),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            LOGGER_FIELD => self.logger = Some(format!("{value:?}")),
            "message" => {
                let _ = write!(self.message, "{value:?}");
            }
            _ => {}
        }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let logger = visitor.logger.as_deref().unwrap_or_else(|| metadata.target());
        writeln!(
            writer,
            "{} {} {} {}",
            Local::now().format(TIMESTAMP_FORMAT),
            logger,
            level_name(*metadata.level()),
            visitor.message
        )
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
