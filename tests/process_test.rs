#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end runs of the `logsetup` binary.

mod common;

use common::{create_test_dir, read_log, run_binary, EXAMPLE_LINE_SUFFIX};
use regex::Regex;
use std::fs;

fn line_pattern() -> Regex {
    Regex::new(
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3} example_logger INFO A new instance of the example has been created$",
    )
    .unwrap()
}

#[test]
fn test_single_run_writes_one_line_per_instance() {
    let temp_dir = create_test_dir();
    let log_file = temp_dir.path().join("app.log");

    let output = run_binary(&["--log-file", log_file.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let content = read_log(&log_file);
    let pattern = line_pattern();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| pattern.is_match(line)), "{content}");
}

#[test]
fn test_three_runs_share_one_file_without_duplication() {
    let temp_dir = create_test_dir();
    let log_file = temp_dir.path().join("app.log");

    for _ in 0..3 {
        let output = run_binary(&["--log-file", log_file.to_str().unwrap(), "--instances", "1"]);
        assert!(output.status.success());
    }

    let content = read_log(&log_file);
    assert_eq!(content.lines().count(), 3, "{content}");
    assert!(content.lines().all(|line| line.ends_with(EXAMPLE_LINE_SUFFIX)));
}

#[test]
fn test_zero_instances_writes_nothing() {
    let temp_dir = create_test_dir();
    let log_file = temp_dir.path().join("app.log");

    let output = run_binary(&["--log-file", log_file.to_str().unwrap(), "--instances", "0"]);
    assert!(output.status.success());
    assert!(log_file.exists());
    assert_eq!(read_log(&log_file), "");
}

#[test]
fn test_truncate_mode_discards_previous_runs() {
    let temp_dir = create_test_dir();
    let log_file = temp_dir.path().join("app.log");
    let path = log_file.to_str().unwrap();

    assert!(run_binary(&["--log-file", path]).status.success());
    assert!(run_binary(&["--log-file", path, "--instances", "1", "--mode", "truncate"])
        .status
        .success());

    assert_eq!(read_log(&log_file).lines().count(), 1);
}

#[test]
fn test_rotation_keeps_at_most_backup_count_files() {
    let temp_dir = create_test_dir();
    let log_file = temp_dir.path().join("app.log");

    // Each line is 90 bytes; a file rotates once it has grown past 200,
    // so no file holds more than three lines.
    let output = run_binary(&[
        "--log-file",
        log_file.to_str().unwrap(),
        "--max-bytes",
        "200",
        "--backup-count",
        "2",
        "--instances",
        "20",
    ]);
    assert!(output.status.success());

    let backups: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("app.log."))
        .collect();
    assert_eq!(backups.len(), 2, "backups: {backups:?}");
    assert!(temp_dir.path().join("app.log.1").exists());
    assert!(temp_dir.path().join("app.log.2").exists());

    assert_eq!(read_log(&temp_dir.path().join("app.log.1")).lines().count(), 3);
    assert_eq!(read_log(&temp_dir.path().join("app.log.2")).lines().count(), 3);
    assert_eq!(read_log(&log_file).lines().count(), 2);
}

#[test]
fn test_config_file_is_applied_and_flags_override_it() {
    let temp_dir = create_test_dir();
    let config_path = temp_dir.path().join("logging.toml");
    let from_config = temp_dir.path().join("from_config.log");
    let from_flag = temp_dir.path().join("from_flag.log");
    fs::write(
        &config_path,
        format!("log_file = {:?}\nbackup_count = 1\n", from_config.to_str().unwrap()),
    )
    .unwrap();

    let config_arg = config_path.to_str().unwrap();
    assert!(run_binary(&["--config", config_arg, "--instances", "1"]).status.success());
    assert!(run_binary(&[
        "--config",
        config_arg,
        "--log-file",
        from_flag.to_str().unwrap(),
        "--instances",
        "2"
    ])
    .status
    .success());

    assert_eq!(read_log(&from_config).lines().count(), 1);
    assert_eq!(read_log(&from_flag).lines().count(), 2);
}

#[test]
fn test_invalid_config_fails_without_writing() {
    let temp_dir = create_test_dir();
    let log_file = temp_dir.path().join("app.log");

    let output = run_binary(&["--log-file", log_file.to_str().unwrap(), "--max-bytes", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to initialize logging"), "{stderr}");
    assert!(!log_file.exists());
}
