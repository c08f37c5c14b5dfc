//! Background execution of alert sequences
//!
//! The executor runs at most one [`Sequencer`] run at a time on Tokio's
//! blocking pool, so the submitting thread never waits on audio. Progress and
//! completion are reported as [`StatusUpdate`] messages on a channel.
//!
//! The running flag is claimed with a single compare-and-swap in `submit` and
//! released by a drop guard, so it returns to idle even if the run panics.

mod error;
mod task;

#[cfg(test)]
mod executor_tests;

pub use error::{SubmitError, TaskError};
pub use task::PlaybackTask;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::Category;
use crate::catalog::ClipId;
use crate::event_log::EventLog;
use crate::selection::SelectionSnapshot;
use crate::sequencer::{ClipOutcome, RunResult, SequenceEvent, Sequencer};

/// Whether a run is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Messages sent to the front end while and after a run plays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    Started { task_id: u64, clips: usize },
    ClipPlayed { category: Category, description: &'static str },
    PlaybackError { clip: ClipId, cause: String },
    Finished { task_id: u64, result: RunResult },
    Aborted { task_id: u64, reason: String },
}

impl StatusUpdate {
    /// Text for a status bar
    pub fn status_text(&self) -> String {
        match self {
            StatusUpdate::Started { .. } => "Playing sequence...".to_string(),
            StatusUpdate::ClipPlayed { category, description } => {
                format!("Played {category} alert: {description}")
            }
            StatusUpdate::PlaybackError { clip, cause } => format!("Could not play {clip}: {cause}"),
            StatusUpdate::Finished { result, .. } => result.summary(),
            StatusUpdate::Aborted { reason, .. } => format!("Playback stopped: {reason}"),
        }
    }
}

pub type StatusSender = mpsc::UnboundedSender<StatusUpdate>;
pub type StatusReceiver = mpsc::UnboundedReceiver<StatusUpdate>;

/// Create the channel status updates are delivered on
pub fn status_channel() -> (StatusSender, StatusReceiver) {
    mpsc::unbounded_channel()
}

/// Clears the running flag when the run ends, however it ends
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PlaybackExecutor {
    sequencer: Arc<Sequencer>,
    event_log: Arc<EventLog>,
    status_tx: StatusSender,
    runtime: Handle,
    running: Arc<AtomicBool>,
    next_task_id: AtomicU64,
}

impl PlaybackExecutor {
    pub fn new(
        sequencer: Arc<Sequencer>,
        event_log: Arc<EventLog>,
        status_tx: StatusSender,
        runtime: Handle,
    ) -> Self {
        Self {
            sequencer,
            event_log,
            status_tx,
            runtime,
            running: Arc::new(AtomicBool::new(false)),
            next_task_id: AtomicU64::new(1),
        }
    }

    pub fn run_state(&self) -> RunState {
        if self.running.load(Ordering::Acquire) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Start playing `snapshot` in the background.
    ///
    /// Returns immediately. Rejected when nothing is selected or another run
    /// is still in flight.
    pub fn submit(&self, snapshot: SelectionSnapshot) -> Result<PlaybackTask, SubmitError> {
        if snapshot.is_empty() {
            tracing::debug!("submission rejected: empty selection");
            return Err(SubmitError::EmptySelection);
        }

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("submission rejected: sequence already playing");
            return Err(SubmitError::Busy);
        }
        let guard = RunGuard(self.running.clone());

        let task_id = self.next_task_id.fetch_add(1, Ordering::Relaxed);
        let combination = self.describe_combination(&snapshot);
        self.event_log
            .info(format!("Test Alert triggered with combination: {combination}"));
        tracing::info!(task_id, clips = snapshot.len(), "alert sequence submitted");

        let _ = self.status_tx.send(StatusUpdate::Started {
            task_id,
            clips: snapshot.len(),
        });

        let sequencer = self.sequencer.clone();
        let event_log = self.event_log.clone();
        let status_tx = self.status_tx.clone();

        let handle = self.runtime.spawn_blocking(move || {
            let progress_tx = status_tx.clone();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                sequencer.run(snapshot, |event| forward_progress(&progress_tx, event))
            }));

            // Back to idle before anyone hears the run is over
            drop(guard);

            match outcome {
                Ok(result) => {
                    let _ = status_tx.send(StatusUpdate::Finished {
                        task_id,
                        result: result.clone(),
                    });
                    Ok(result)
                }
                Err(payload) => {
                    let reason = panic_message(&*payload);
                    tracing::error!(task_id, %reason, "alert sequence panicked");
                    event_log.error(format!("Alert sequence aborted: {reason}"));
                    let _ = status_tx.send(StatusUpdate::Aborted {
                        task_id,
                        reason: reason.clone(),
                    });
                    Err(TaskError::Panicked(reason))
                }
            }
        });

        Ok(PlaybackTask::new(task_id, handle))
    }

    fn describe_combination(&self, snapshot: &SelectionSnapshot) -> String {
        let catalog = self.sequencer.catalog();
        snapshot
            .selected()
            .map(|(category, clip)| {
                catalog
                    .description(category, clip)
                    .map(String::from)
                    .unwrap_or_else(|_| clip.to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn forward_progress(status_tx: &StatusSender, event: SequenceEvent) {
    let update = match event {
        SequenceEvent::Finished(ClipOutcome::Played {
            category,
            description,
            ..
        }) => StatusUpdate::ClipPlayed {
            category,
            description,
        },
        SequenceEvent::Finished(ClipOutcome::Failed { clip, cause, .. }) => {
            StatusUpdate::PlaybackError { clip, cause }
        }
        SequenceEvent::Starting { category, clip } => {
            tracing::debug!(%category, %clip, "playing clip");
            return;
        }
        SequenceEvent::Pause(delay) => {
            tracing::trace!(?delay, "pausing between clips");
            return;
        }
    };
    let _ = status_tx.send(update);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
