//! Size-rotating file sink.
//!
//! Rotation is done by `file_rotate`: once the active file has grown past
//! `max_bytes`, the next record first shifts the backups
//! (`app.log.1` -> `app.log.2`, ...) and moves the active file to
//! `app.log.1`. At most `backup_count` backups are kept. With
//! `backup_count == 0` the file is never rotated.
//!
//! This type adds what `FileRotate` leaves out: surfacing open errors,
//! truncate-on-open, and close with lazy reopen.

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::config::{LogConfig, OpenMode};
use crate::error::LoggingError;

/// A file sink that rotates by size. Writes are serialized internally.
pub struct RotatingFileSink {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    writer: Mutex<Option<FileRotate<AppendCount>>>,
}

impl std::fmt::Debug for RotatingFileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileSink")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backup_count", &self.backup_count)
            .finish_non_exhaustive()
    }
}

impl RotatingFileSink {
    /// Open (or create) the active file.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::PermissionDenied`] when the file or its
    /// directory is not writable, [`LoggingError::Io`] for other failures.
    pub fn open(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backup_count: usize,
        mode: OpenMode,
    ) -> Result<Self, LoggingError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LoggingError::from_io(parent, e))?;
        }
        // FileRotate swallows open failures; open the file here first.
        open_active(&path, mode).map_err(|e| LoggingError::from_io(&path, e))?;

        let sink = Self {
            path,
            max_bytes,
            backup_count,
            writer: Mutex::new(None),
        };
        *sink.lock() = Some(sink.build_writer());
        Ok(sink)
    }

    /// Open the sink described by a validated [`LogConfig`].
    pub fn from_config(config: &LogConfig) -> Result<Self, LoggingError> {
        Self::open(
            &config.log_file,
            config.max_bytes,
            config.backup_count,
            config.mode,
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    #[must_use]
    pub const fn backup_count(&self) -> usize {
        self.backup_count
    }

    /// Bytes currently in the active file.
    #[must_use]
    pub fn current_size(&self) -> u64 {
        fs::metadata(&self.path).map_or(0, |m| m.len())
    }

    /// Path of the `index`-th backup (`app.log.1`, `app.log.2`, ...).
    #[must_use]
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Write one formatted record, rotating first if the active file is full.
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut writer = self.lock();
        // Closed by shutdown; keep accepting records.
        let writer = writer.get_or_insert_with(|| self.build_writer());
        writer.write_all(record)?;
        writer.flush()
    }

    /// Empty the active file, keeping the backups.
    pub fn truncate(&self) -> io::Result<()> {
        let mut writer = self.lock();
        drop(writer.take());
        open_active(&self.path, OpenMode::Truncate)?;
        *writer = Some(self.build_writer());
        Ok(())
    }

    /// Flush the active file to the OS.
    pub fn flush_file(&self) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Flush and close the active file. A later write reopens it.
    pub fn close(&self) -> io::Result<()> {
        if let Some(mut writer) = self.lock().take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn build_writer(&self) -> FileRotate<AppendCount> {
        let content_limit = if self.backup_count == 0 {
            ContentLimit::None
        } else {
            ContentLimit::BytesSurpassed(usize::try_from(self.max_bytes).unwrap_or(usize::MAX))
        };
        FileRotate::new(
            &self.path,
            AppendCount::new(self.backup_count),
            content_limit,
            Compression::None,
            #[cfg(unix)]
            None,
        )
    }

    fn lock(&self) -> MutexGuard<'_, Option<FileRotate<AppendCount>>> {
        // A panic mid-write leaves the writer usable; recover the guard.
        self.writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Write for &RotatingFileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_file()
    }
}

fn open_active(path: &Path, mode: OpenMode) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        OpenMode::Append => options.append(true),
        OpenMode::Truncate => options.write(true).truncate(true),
    };
    options.open(path).map(drop)
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod sink_tests;
