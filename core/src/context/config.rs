//! Application configuration
//!
//! Re-exports the shared types from klaxon-types and adds persistence through
//! confy (TOML in the platform config directory).

use std::path::PathBuf;
use std::time::Duration;

pub use klaxon_types::{AppConfig, CategoryDirectories, PlaybackSettings};

use super::ConfigError;

const APP_NAME: &str = "klaxon";
const CONFIG_NAME: &str = "config";

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load the stored config, falling back to defaults when missing or unreadable
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn inter_clip_delay(&self) -> Duration;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }

    fn inter_clip_delay(&self) -> Duration {
        Duration::from_millis(self.playback.inter_clip_delay_ms)
    }
}
