//! klaxon-core: the alert-sequence playback engine
//!
//! - **catalog**: which clips exist per category, and their labels
//! - **selection**: one clip per category, toggle to clear
//! - **sequencer**: plays a selection in priority order with pauses
//! - **executor**: runs the sequencer in the background, one run at a time
//! - **event_log**: timestamped record of submissions and playback outcomes
//! - **context**: owns all of the above, built once at startup

pub mod audio;
pub mod catalog;
pub mod context;
pub mod event_log;
pub mod executor;
pub mod selection;
pub mod sequencer;

#[cfg(test)]
mod testing;

pub use klaxon_types::Category;

// Re-exports for convenience
pub use audio::{AudioPlayer, PlaybackError, RodioPlayer};
pub use catalog::{Catalog, CatalogError, CatalogLoader, ClipId, ClipSource, DirectorySource, LoadedCatalog};
pub use context::{AlertContext, AppConfig, AppConfigExt, ConfigError};
pub use event_log::{EventLog, EventLogError, LogEntry, LogLevel};
pub use executor::{
    PlaybackExecutor, PlaybackTask, RunState, StatusReceiver, StatusSender, StatusUpdate, SubmitError,
    TaskError, status_channel,
};
pub use selection::{Selection, SelectionSnapshot, ToggleOutcome};
pub use sequencer::{ClipOutcome, DEFAULT_INTER_CLIP_DELAY, RunResult, SequenceEvent, Sequencer};
