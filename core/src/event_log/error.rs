//! Error types for the event log

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("failed to create log directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open event log {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
