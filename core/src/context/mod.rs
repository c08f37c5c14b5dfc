//! Engine context
//!
//! [`AlertContext`] is built once at startup and owns everything the engine
//! needs: configuration, the clip catalog, the current selection, the event
//! log and the playback executor. Front ends hold one context and talk to it
//! through `toggle` / `submit`; progress comes back on the status channel.

mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, CategoryDirectories, PlaybackSettings};
pub use error::ConfigError;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;

use crate::Category;
use crate::audio::AudioPlayer;
use crate::catalog::{Catalog, CatalogError, CatalogLoader, ClipId, DirectorySource, LoadedCatalog};
use crate::event_log::EventLog;
use crate::executor::{PlaybackExecutor, PlaybackTask, RunState, StatusReceiver, SubmitError, status_channel};
use crate::selection::{Selection, SelectionSnapshot, ToggleOutcome};
use crate::sequencer::Sequencer;

pub struct AlertContext {
    config: AppConfig,
    catalog: Arc<Catalog>,
    catalog_warnings: Vec<CatalogError>,
    selection: Mutex<Selection>,
    event_log: Arc<EventLog>,
    executor: PlaybackExecutor,
}

impl AlertContext {
    /// Load the catalog from the configured audio directory, open the event
    /// log file and wire up the executor.
    ///
    /// If the event log file cannot be opened, entries are kept in memory only.
    pub fn new(config: AppConfig, player: Arc<dyn AudioPlayer>, runtime: Handle) -> (Self, StatusReceiver) {
        let loaded = CatalogLoader::new(DirectorySource::from_config(&config)).load();
        let event_log = match EventLog::open(&config.event_log_path) {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!(error = %e, "event log file unavailable, keeping entries in memory");
                EventLog::in_memory()
            }
        };
        Self::from_parts(config, loaded, event_log, player, runtime)
    }

    pub fn from_parts(
        config: AppConfig,
        loaded: LoadedCatalog,
        event_log: EventLog,
        player: Arc<dyn AudioPlayer>,
        runtime: Handle,
    ) -> (Self, StatusReceiver) {
        let catalog = Arc::new(loaded.catalog);
        let event_log = Arc::new(event_log);
        let sequencer = Sequencer::new(catalog.clone(), player, event_log.clone())
            .with_inter_clip_delay(config.inter_clip_delay());

        let (status_tx, status_rx) = status_channel();
        let executor = PlaybackExecutor::new(Arc::new(sequencer), event_log.clone(), status_tx, runtime);

        let context = Self {
            config,
            catalog,
            catalog_warnings: loaded.warnings,
            selection: Mutex::new(Selection::new()),
            event_log,
            executor,
        };
        (context, status_rx)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Problems found while loading the catalog, for the front end to show
    pub fn catalog_warnings(&self) -> &[CatalogError] {
        &self.catalog_warnings
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Select `clip` for `category`, or clear the category if `clip` is
    /// already selected. Only clips listed in the catalog are accepted.
    pub fn toggle(&self, category: Category, clip: ClipId) -> Result<ToggleOutcome, CatalogError> {
        if !self.catalog.contains(category, &clip) {
            return Err(CatalogError::UnknownClip {
                category,
                clip: clip.to_string(),
            });
        }

        let clip_name = clip.to_string();
        let outcome = self.lock_selection().toggle(category, clip);
        tracing::info!(%category, clip = %clip_name, ?outcome, "selection changed");
        Ok(outcome)
    }

    /// Current selection
    pub fn selection(&self) -> SelectionSnapshot {
        self.lock_selection().snapshot()
    }

    /// Snapshot the selection and hand it to the executor
    pub fn submit(&self) -> Result<PlaybackTask, SubmitError> {
        let snapshot = self.selection();
        self.executor.submit(snapshot)
    }

    pub fn run_state(&self) -> RunState {
        self.executor.run_state()
    }

    fn lock_selection(&self) -> std::sync::MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
