//! Test doubles shared by the engine's unit tests

use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex};

use crate::Category;
use crate::audio::{AudioPlayer, PlaybackError};
use crate::catalog::{Catalog, ClipId};
use crate::selection::{Selection, SelectionSnapshot};

/// Catalog with two described clips per category, no filesystem needed
pub fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    catalog.set_category(
        Category::Warning,
        PathBuf::from("audio/Warnings"),
        vec!["Critical_error.m4a".into(), "Warning.m4a".into()],
    );
    catalog.set_category(
        Category::Message,
        PathBuf::from("audio/Messages"),
        vec!["Program started.m4a".into(), "Program stopped.m4a".into()],
    );
    catalog.set_category(
        Category::Reason,
        PathBuf::from("audio/Reasons"),
        vec!["Task failed.m4a".into(), "Unknown.m4a".into()],
    );
    catalog
}

/// Build a snapshot by toggling the given clips in order
pub fn snapshot_of(picks: &[(Category, &str)]) -> SelectionSnapshot {
    let mut selection = Selection::new();
    for (category, clip) in picks {
        selection.toggle(*category, ClipId::from(*clip));
    }
    selection.snapshot()
}

/// Records every clip it is asked to play; fails the ones named in `failing`
#[derive(Default)]
pub struct ScriptedPlayer {
    played: Mutex<Vec<PathBuf>>,
    failing: Vec<String>,
}

impl ScriptedPlayer {
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            played: Mutex::new(Vec::new()),
            failing: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// File names of every play attempt, in order
    pub fn attempts(&self) -> Vec<String> {
        self.played
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().and_then(|f| f.to_str()).map(String::from))
            .collect()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.played.lock().unwrap().clone()
    }
}

impl AudioPlayer for ScriptedPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        self.played.lock().unwrap().push(path.to_path_buf());
        let name = path.file_name().and_then(|f| f.to_str()).unwrap_or_default();
        if self.failing.iter().any(|f| f == name) {
            return Err(PlaybackError::Other("decoder exploded".to_string()));
        }
        Ok(())
    }
}

/// Blocks every play until the gate is opened
#[derive(Default)]
pub struct GatedPlayer {
    open: Mutex<bool>,
    changed: Condvar,
    plays: Mutex<usize>,
}

impl GatedPlayer {
    pub fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.changed.notify_all();
    }

    pub fn plays(&self) -> usize {
        *self.plays.lock().unwrap()
    }
}

impl AudioPlayer for GatedPlayer {
    fn play(&self, _path: &Path) -> Result<(), PlaybackError> {
        *self.plays.lock().unwrap() += 1;
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.changed.wait(open).unwrap();
        }
        Ok(())
    }
}

/// Panics on the first play
pub struct PanickingPlayer;

impl AudioPlayer for PanickingPlayer {
    fn play(&self, _path: &Path) -> Result<(), PlaybackError> {
        panic!("audio backend fell over");
    }
}
