use std::sync::Arc;

use klaxon_core::{AlertContext, AppConfig, AppConfigExt, PlaybackTask, RodioPlayer, StatusReceiver};
use tokio::runtime::Handle;
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the REPL.
/// This is a lightweight container - logic lives in the engine.
#[derive(Clone)]
pub struct CliContext {
    pub alerts: Arc<AlertContext>,
    /// Editable copy of the config. The engine keeps the one it started with.
    pub config: Arc<RwLock<AppConfig>>,
    /// The most recently submitted run, until someone waits on it
    pub task: Arc<Mutex<Option<PlaybackTask>>>,
}

impl CliContext {
    /// Load config, build the engine and return the status channel to drain.
    /// Must be called from within the Tokio runtime.
    pub fn new() -> (Self, StatusReceiver) {
        let config = AppConfig::load();
        let (alerts, status_rx) =
            AlertContext::new(config.clone(), Arc::new(RodioPlayer::new()), Handle::current());
        (Self::from_parts(alerts, config), status_rx)
    }

    pub fn from_parts(alerts: AlertContext, config: AppConfig) -> Self {
        Self {
            alerts: Arc::new(alerts),
            config: Arc::new(RwLock::new(config)),
            task: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait for the in-flight run, if any, so shutdown does not cut audio off
    pub async fn finish(&self) {
        if let Some(task) = self.task.lock().await.take()
            && let Err(e) = task.wait().await
        {
            tracing::warn!(error = %e, "playback run ended abnormally");
        }
    }
}
