//! Shared configuration types for klaxon
//!
//! This crate contains serializable types that are shared between the
//! playback engine (klaxon-core) and the interactive front end.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Alert Categories
// ─────────────────────────────────────────────────────────────────────────────

/// The three alert classes a clip can belong to.
///
/// Variant order is the playback priority: `Warning < Message < Reason`.
/// Presentation order is up to the caller and never affects playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Warning,
    Message,
    Reason,
}

impl Category {
    /// All categories in playback priority order.
    pub const ALL: [Category; 3] = [Category::Warning, Category::Message, Category::Reason];

    /// Position in [`Category::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Category::Warning => 0,
            Category::Message => 1,
            Category::Reason => 2,
        }
    }

    /// Label used in status text and event log lines (e.g. "Playing Warnings alert")
    pub fn label(self) -> &'static str {
        match self {
            Category::Warning => "Warnings",
            Category::Message => "Messages",
            Category::Reason => "Reasons",
        }
    }

    /// Parse a user-supplied category name. Accepts singular, plural and any case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "warning" | "warnings" | "w" => Some(Category::Warning),
            "message" | "messages" | "m" => Some(Category::Message),
            "reason" | "reasons" | "r" => Some(Category::Reason),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

fn default_audio_directory() -> String {
    "audio".to_string()
}

fn default_clip_extension() -> String {
    "m4a".to_string()
}

fn default_event_log_path() -> String {
    "logs/log.txt".to_string()
}

fn default_inter_clip_delay_ms() -> u64 {
    500
}

fn default_warnings_dir() -> String {
    "Warnings".to_string()
}

fn default_messages_dir() -> String {
    "Messages".to_string()
}

fn default_reasons_dir() -> String {
    "Reasons".to_string()
}

/// Sub-directory of the audio directory holding each category's clips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDirectories {
    #[serde(default = "default_warnings_dir")]
    pub warnings: String,
    #[serde(default = "default_messages_dir")]
    pub messages: String,
    #[serde(default = "default_reasons_dir")]
    pub reasons: String,
}

impl CategoryDirectories {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Warning => &self.warnings,
            Category::Message => &self.messages,
            Category::Reason => &self.reasons,
        }
    }
}

impl Default for CategoryDirectories {
    fn default() -> Self {
        Self {
            warnings: default_warnings_dir(),
            messages: default_messages_dir(),
            reasons: default_reasons_dir(),
        }
    }
}

/// Sequence playback settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Pause between two consecutive clips of a sequence, in milliseconds
    #[serde(default = "default_inter_clip_delay_ms")]
    pub inter_clip_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            inter_clip_delay_ms: default_inter_clip_delay_ms(),
        }
    }
}

/// Persisted application configuration.
///
/// Note: Persistence methods (load/save) are provided by klaxon-core via the
/// `AppConfigExt` trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory containing one sub-directory per category
    #[serde(default = "default_audio_directory")]
    pub audio_directory: String,
    #[serde(default)]
    pub category_dirs: CategoryDirectories,
    /// Extension (without the dot) a file must carry to be listed as a clip
    #[serde(default = "default_clip_extension")]
    pub clip_extension: String,
    /// Append-only event log file, created on first run
    #[serde(default = "default_event_log_path")]
    pub event_log_path: String,
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audio_directory: default_audio_directory(),
            category_dirs: CategoryDirectories::default(),
            clip_extension: default_clip_extension(),
            event_log_path: default_event_log_path(),
            playback: PlaybackSettings::default(),
        }
    }
}
