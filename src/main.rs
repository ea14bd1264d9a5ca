#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use clap::Parser;
use color_eyre::eyre::Result;
use logsetup::{init_logging, load_config, shutdown_logging, Example, LogConfig, OpenMode};
use std::path::PathBuf;

/// Attach a rotating log file once, then construct the example component.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with logging settings; flags below override it
    #[arg(long, env = "LOGSETUP_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (default: app.log)
    #[arg(long, env = "LOGSETUP_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Rotate once the active file would reach this many bytes (default: 100 MiB)
    #[arg(long, env = "LOGSETUP_MAX_BYTES")]
    max_bytes: Option<u64>,

    /// Number of rotated files to keep (default: 10)
    #[arg(long, env = "LOGSETUP_BACKUP_COUNT")]
    backup_count: Option<usize>,

    /// Open mode for the active file: append or truncate (default: append)
    #[arg(long, env = "LOGSETUP_MODE")]
    mode: Option<OpenMode>,

    /// How many example instances to construct
    #[arg(long, env = "LOGSETUP_INSTANCES", default_value_t = 3)]
    instances: usize,
}

impl Args {
    fn resolve_config(&self) -> Result<LogConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => LogConfig::default(),
        };
        if let Some(log_file) = &self.log_file {
            config.log_file.clone_from(log_file);
        }
        if let Some(max_bytes) = self.max_bytes {
            config.max_bytes = max_bytes;
        }
        if let Some(backup_count) = self.backup_count {
            config.backup_count = backup_count;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = args.resolve_config()?;

    if let Err(e) = init_logging(&config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Note: No records were written.");
        eprintln!("Logs: {}", config.log_file.display());
        eprintln!();
        return Err(e.into());
    }

    for _ in 0..args.instances {
        let _ = Example::new();
    }

    shutdown_logging()?;
    Ok(())
}
