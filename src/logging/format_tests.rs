use super::*;
use crate::config::OpenMode;
use crate::logging::sink::RotatingFileSink;
use regex::Regex;
use std::sync::Arc;
use tempfile::tempdir;
use tracing_subscriber::layer::SubscriberExt;

fn capture(emit: impl FnOnce()) -> String {
    let dir = tempdir().unwrap();
    let path = dir.path().join("format.log");
    let sink = Arc::new(RotatingFileSink::open(&path, 1 << 20, 1, OpenMode::Append).unwrap());
    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .event_format(RecordFormat)
            .with_ansi(false)
            .with_writer(Arc::clone(&sink)),
    );
    tracing::subscriber::with_default(subscriber, emit);
    std::fs::read_to_string(&path).unwrap()
}

#[test]
fn test_line_uses_logger_field_as_name() {
    let output = capture(|| {
        tracing::info!(logger = "example_logger", "A new instance of the example has been created");
    });
    let pattern = Regex::new(
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3} example_logger INFO A new instance of the example has been created\n$",
    )
    .unwrap();
    assert!(pattern.is_match(&output), "unexpected line: {output:?}");
}

#[test]
fn test_display_valued_logger_field() {
    let name = String::from("orders");
    let output = capture(|| tracing::warn!(logger = %name, "queue is {} deep", 12));
    assert!(output.ends_with(" orders WARNING queue is 12 deep\n"), "{output:?}");
}

#[test]
fn test_target_used_without_logger_field() {
    let output = capture(|| tracing::error!(target: "billing", "charge failed"));
    assert!(output.ends_with(" billing ERROR charge failed\n"), "{output:?}");
}

#[test]
fn test_other_fields_are_not_printed() {
    let output = capture(|| tracing::info!(logger = "svc", attempt = 3, "started"));
    assert!(output.ends_with(" svc INFO started\n"), "{output:?}");
}

#[test]
fn test_level_names() {
    assert_eq!(level_name(Level::TRACE), "TRACE");
    assert_eq!(level_name(Level::DEBUG), "DEBUG");
    assert_eq!(level_name(Level::INFO), "INFO");
    assert_eq!(level_name(Level::WARN), "WARNING");
    assert_eq!(level_name(Level::ERROR), "ERROR");
}
