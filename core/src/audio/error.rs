//! Error types for clip playback

use std::path::PathBuf;
use thiserror::Error;

/// Why a single clip could not be played
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available: {0}")]
    OutputDevice(#[from] rodio::StreamError),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("failed to start playback: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("{0}")]
    Other(String),
}
