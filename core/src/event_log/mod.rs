//! Append-only record of alert submissions and playback outcomes
//!
//! Entries are kept in memory and, when opened with a path, appended to a text
//! file one line per entry:
//!
//! ```text
//! 2026-10-16T14:03:27.512+02:00 - INFO - Playing Warnings alert: GENERAL WARNING
//! ```
//!
//! Appending never fails the caller. A write error is reported through
//! `tracing` and the entry is still kept in memory.

mod error;

pub use error::EventLogError;

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => f.write_str("INFO"),
            LogLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// `{ISO-8601 timestamp} - {LEVEL} - {message}`
    pub fn format(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            self.level,
            self.message
        )
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[derive(Default)]
struct Inner {
    entries: Vec<LogEntry>,
    file: Option<File>,
}

/// Thread-safe event log shared by the control thread and the playback worker
#[derive(Default)]
pub struct EventLog {
    // One lock for memory and file keeps both in the same order
    inner: Mutex<Inner>,
    path: Option<PathBuf>,
}

impl EventLog {
    /// Log that is only kept in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (creating if needed) the log file and its parent directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EventLogError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| EventLogError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| EventLogError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            inner: Mutex::new(Inner {
                entries: Vec::new(),
                file: Some(file),
            }),
            path: Some(path.to_path_buf()),
        })
    }

    /// File the log is persisted to, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn append(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::info!(target: "klaxon::events", "{message}"),
            LogLevel::Error => tracing::error!(target: "klaxon::events", "{message}"),
        }

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = LogEntry {
            timestamp: Local::now(),
            level,
            message,
        };

        if let Some(file) = inner.file.as_mut()
            && let Err(e) = writeln!(file, "{}", entry.format()).and_then(|()| file.flush())
        {
            tracing::warn!(path = ?self.path, error = %e, "failed to write event log entry");
        }
        inner.entries.push(entry);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.append(LogLevel::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.append(LogLevel::Error, message);
    }

    /// All entries recorded by this process, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    /// The last `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let start = inner.entries.len().saturating_sub(n);
        inner.entries[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
