//! Common test utilities

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Read the log file, treating a missing file as empty
pub fn read_log(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

/// Run the `logsetup` binary with the given arguments
#[allow(dead_code)] // Not every integration test spawns the binary
pub fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logsetup"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LOGSETUP_CONFIG")
        .env_remove("LOGSETUP_LOG_FILE")
        .env_remove("LOGSETUP_MAX_BYTES")
        .env_remove("LOGSETUP_BACKUP_COUNT")
        .env_remove("LOGSETUP_MODE")
        .env_remove("LOGSETUP_INSTANCES")
        .output()
        .expect("Failed to run logsetup binary")
}

/// Line every example construction writes, minus the timestamp
#[allow(dead_code)]
pub const EXAMPLE_LINE_SUFFIX: &str =
    " example_logger INFO A new instance of the example has been created";
