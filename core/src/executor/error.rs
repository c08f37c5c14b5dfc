//! Error types for sequence submission

use thiserror::Error;

/// Why a submission was turned down. No state changes when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select at least one alert")]
    EmptySelection,

    #[error("A sequence is already playing")]
    Busy,
}

impl SubmitError {
    /// Short machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitError::EmptySelection => "empty-selection",
            SubmitError::Busy => "busy",
        }
    }
}

/// A run that did not produce a result
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("playback worker panicked: {0}")]
    Panicked(String),

    #[error("playback worker was lost")]
    Join(#[from] tokio::task::JoinError),
}
