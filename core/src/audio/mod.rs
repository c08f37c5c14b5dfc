//! Audio playback boundary
//!
//! The sequencer only needs "play this file and return when it is done".
//! [`RodioPlayer`] does that against the default output device; tests swap in
//! scripted players through the [`AudioPlayer`] trait.

mod error;
mod player;

pub use error::PlaybackError;
pub use player::{AudioPlayer, RodioPlayer};
