use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::PlaybackError;

/// Plays one clip to completion.
///
/// `play` blocks the calling thread until the clip has finished sounding, so
/// it must only be called from a worker thread.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Plays clips on the default output device using rodio.
///
/// `OutputStream` is not `Send`, so a stream is opened for each clip on the
/// calling thread and dropped once the clip is done.
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (_stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;

        tracing::debug!(path = %path.display(), "clip playback started");
        sink.append(source);
        sink.sleep_until_end();
        tracing::debug!(path = %path.display(), "clip playback finished");

        Ok(())
    }
}
