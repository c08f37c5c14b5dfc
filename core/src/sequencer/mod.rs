//! Ordered alert playback
//!
//! The sequencer plays the clips of one [`SelectionSnapshot`] back to back in
//! category priority order (`Warning`, `Message`, `Reason`). Each clip plays to
//! completion before the next starts, with a fixed pause in between. A clip
//! that fails is logged and skipped; the rest of the sequence still plays.


use std::sync::Arc;
use std::time::Duration;

use crate::Category;
use crate::audio::AudioPlayer;
use crate::catalog::{Catalog, ClipId};
use crate::event_log::EventLog;
use crate::selection::SelectionSnapshot;

/// Default pause between two clips of a sequence
pub const DEFAULT_INTER_CLIP_DELAY: Duration = Duration::from_millis(500);

/// What happened to one clip of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipOutcome {
    Played {
        category: Category,
        clip: ClipId,
        description: &'static str,
    },
    Failed {
        category: Category,
        clip: ClipId,
        cause: String,
    },
}

impl ClipOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, ClipOutcome::Played { .. })
    }
}

/// Summary of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Clips that played successfully
    pub played: usize,
    /// One entry per attempted clip, in playback order
    pub outcomes: Vec<ClipOutcome>,
}

impl RunResult {
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.played
    }

    /// Status line shown once a run is over, e.g. "Played 2 alerts"
    pub fn summary(&self) -> String {
        match self.played {
            1 => "Played 1 alert".to_string(),
            n => format!("Played {n} alerts"),
        }
    }
}

/// Progress reported while a run is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEvent {
    /// A clip is about to be played
    Starting { category: Category, clip: ClipId },
    /// A clip finished, successfully or not
    Finished(ClipOutcome),
    /// Pausing before the next clip
    Pause(Duration),
}

pub struct Sequencer {
    catalog: Arc<Catalog>,
    player: Arc<dyn AudioPlayer>,
    event_log: Arc<EventLog>,
    inter_clip_delay: Duration,
}

impl Sequencer {
    pub fn new(catalog: Arc<Catalog>, player: Arc<dyn AudioPlayer>, event_log: Arc<EventLog>) -> Self {
        Self {
            catalog,
            player,
            event_log,
            inter_clip_delay: DEFAULT_INTER_CLIP_DELAY,
        }
    }

    pub fn with_inter_clip_delay(mut self, delay: Duration) -> Self {
        self.inter_clip_delay = delay;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Play every selected clip of `snapshot`, blocking until the last one is
    /// done. Must run on a worker thread.
    ///
    /// The pause follows each successfully played clip that has another clip
    /// after it. Unselected categories are skipped without a pause.
    pub fn run(&self, snapshot: SelectionSnapshot, mut progress: impl FnMut(SequenceEvent)) -> RunResult {
        let selected: Vec<(Category, &ClipId)> = snapshot.selected().collect();
        let mut result = RunResult::default();

        for (i, (category, clip)) in selected.iter().copied().enumerate() {
            progress(SequenceEvent::Starting {
                category,
                clip: clip.clone(),
            });

            let outcome = self.play_clip(category, clip);
            let played = outcome.is_played();
            if played {
                result.played += 1;
            }
            result.outcomes.push(outcome.clone());
            progress(SequenceEvent::Finished(outcome));

            let is_last = i + 1 == selected.len();
            if played && !is_last {
                progress(SequenceEvent::Pause(self.inter_clip_delay));
                if !self.inter_clip_delay.is_zero() {
                    std::thread::sleep(self.inter_clip_delay);
                }
            }
        }

        tracing::info!(
            played = result.played,
            failed = result.failed(),
            "alert sequence complete"
        );
        result
    }

    fn play_clip(&self, category: Category, clip: &ClipId) -> ClipOutcome {
        let attempt = self
            .catalog
            .description(category, clip)
            .map_err(|e| e.to_string())
            .and_then(|description| {
                let path = self.catalog.clip_path(category, clip);
                self.player
                    .play(&path)
                    .map(|()| description)
                    .map_err(|e| e.to_string())
            });

        match attempt {
            Ok(description) => {
                self.event_log
                    .info(format!("Playing {category} alert: {description}"));
                ClipOutcome::Played {
                    category,
                    clip: clip.clone(),
                    description,
                }
            }
            Err(cause) => {
                self.event_log.error(format!("Error playing {clip}: {cause}"));
                ClipOutcome::Failed {
                    category,
                    clip: clip.clone(),
                    cause,
                }
            }
        }
    }
}
