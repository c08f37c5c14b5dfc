//! Tests for PlaybackExecutor submission rules and run-state handling

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;

use super::{PlaybackExecutor, RunState, StatusReceiver, StatusUpdate, SubmitError, TaskError, status_channel};
use crate::Category;
use crate::audio::AudioPlayer;
use crate::event_log::{EventLog, LogLevel};
use crate::sequencer::Sequencer;
use crate::testing::{GatedPlayer, PanickingPlayer, ScriptedPlayer, fixture_catalog, snapshot_of};

fn executor(player: Arc<dyn AudioPlayer>) -> (PlaybackExecutor, Arc<EventLog>, StatusReceiver) {
    executor_with_log(player, EventLog::in_memory())
}

fn executor_with_log(
    player: Arc<dyn AudioPlayer>,
    log: EventLog,
) -> (PlaybackExecutor, Arc<EventLog>, StatusReceiver) {
    let log = Arc::new(log);
    let sequencer = Sequencer::new(Arc::new(fixture_catalog()), player, log.clone())
        .with_inter_clip_delay(Duration::ZERO);
    let (tx, rx) = status_channel();
    let executor = PlaybackExecutor::new(Arc::new(sequencer), log.clone(), tx, Handle::current());
    (executor, log, rx)
}

fn drain(rx: &mut StatusReceiver) -> Vec<StatusUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

#[tokio::test]
async fn test_empty_selection_is_rejected() {
    let player = Arc::new(ScriptedPlayer::default());
    let (executor, log, mut rx) = executor(player.clone());

    let err = executor.submit(snapshot_of(&[])).unwrap_err();

    assert_eq!(err, SubmitError::EmptySelection);
    assert_eq!(err.reason(), "empty-selection");
    assert_eq!(err.to_string(), "Please select at least one alert");
    assert_eq!(executor.run_state(), RunState::Idle);
    assert!(log.is_empty());
    assert!(player.attempts().is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_second_submission_while_running_is_busy() {
    let player = Arc::new(GatedPlayer::default());
    let (executor, log, _rx) = executor(player.clone());
    let snapshot = snapshot_of(&[(Category::Warning, "Warning.m4a")]);

    let first = executor.submit(snapshot.clone()).unwrap();
    let first_id = first.id();
    assert_eq!(executor.run_state(), RunState::Running);

    let err = executor.submit(snapshot.clone()).unwrap_err();
    assert_eq!(err, SubmitError::Busy);
    assert_eq!(err.reason(), "busy");
    assert_eq!(executor.run_state(), RunState::Running);

    player.open();
    let result = first.wait().await.unwrap();
    assert_eq!(result.played, 1);
    assert_eq!(player.plays(), 1, "the rejected submission must not start a worker");
    assert_eq!(executor.run_state(), RunState::Idle);

    let submissions = log
        .entries()
        .iter()
        .filter(|e| e.message.starts_with("Test Alert triggered"))
        .count();
    assert_eq!(submissions, 1);

    let second = executor.submit(snapshot).unwrap();
    assert_ne!(second.id(), first_id);
    second.wait().await.unwrap();
    assert_eq!(player.plays(), 2);
}

#[tokio::test]
async fn test_status_updates_for_a_full_run() {
    let player = Arc::new(ScriptedPlayer::default());
    let (executor, _log, mut rx) = executor(player);

    let task = executor
        .submit(snapshot_of(&[
            (Category::Message, "Program started.m4a"),
            (Category::Warning, "Warning.m4a"),
        ]))
        .unwrap();
    let task_id = task.id();
    let result = task.wait().await.unwrap();

    let updates = drain(&mut rx);
    assert_eq!(
        updates,
        vec![
            StatusUpdate::Started { task_id, clips: 2 },
            StatusUpdate::ClipPlayed {
                category: Category::Warning,
                description: "GENERAL WARNING",
            },
            StatusUpdate::ClipPlayed {
                category: Category::Message,
                description: "PROGRAM STARTED",
            },
            StatusUpdate::Finished {
                task_id,
                result: result.clone(),
            },
        ]
    );
    assert_eq!(updates[0].status_text(), "Playing sequence...");
    assert_eq!(updates[3].status_text(), "Played 2 alerts");
}

#[tokio::test]
async fn test_submission_is_logged_before_playback() {
    let player = Arc::new(ScriptedPlayer::default());
    let (executor, log, _rx) = executor(player);

    executor
        .submit(snapshot_of(&[
            (Category::Reason, "Unknown.m4a"),
            (Category::Warning, "Critical_error.m4a"),
        ]))
        .unwrap()
        .wait()
        .await
        .unwrap();

    let messages: Vec<_> = log.entries().into_iter().map(|e| e.message).collect();
    assert_eq!(
        messages,
        vec![
            "Test Alert triggered with combination: CRITICAL ERROR, UNKNOWN ISSUE",
            "Playing Warnings alert: CRITICAL ERROR",
            "Playing Reasons alert: UNKNOWN ISSUE",
        ]
    );
}

#[tokio::test]
async fn test_playback_error_is_forwarded() {
    let player = Arc::new(ScriptedPlayer::failing_on(&["Unknown.m4a"]));
    let (executor, _log, mut rx) = executor(player);

    let result = executor
        .submit(snapshot_of(&[(Category::Reason, "Unknown.m4a")]))
        .unwrap()
        .wait()
        .await
        .unwrap();
    assert_eq!(result.played, 0);

    let errors: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter(|u| matches!(u, StatusUpdate::PlaybackError { .. }))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].status_text(), "Could not play Unknown.m4a: decoder exploded");
}

#[tokio::test]
async fn test_run_state_released_after_panic() {
    let (executor, log, mut rx) = executor(Arc::new(PanickingPlayer));
    let snapshot = snapshot_of(&[(Category::Warning, "Warning.m4a")]);

    let err = executor.submit(snapshot.clone()).unwrap().wait().await.unwrap_err();

    match err {
        TaskError::Panicked(reason) => assert!(reason.contains("audio backend fell over")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(executor.run_state(), RunState::Idle);
    assert!(
        drain(&mut rx)
            .iter()
            .any(|u| matches!(u, StatusUpdate::Aborted { .. }))
    );
    assert_eq!(log.entries().last().map(|e| e.level), Some(LogLevel::Error));

    // A new submission is accepted once the failed run released the flag
    let retry = executor.submit(snapshot).expect("flag should be released");
    assert!(retry.wait().await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_submissions_admit_exactly_one() {
    const SUBMITTERS: usize = 8;

    let player = Arc::new(GatedPlayer::default());
    let (executor, log, _rx) = executor(player.clone());
    let executor = Arc::new(executor);
    let snapshot = snapshot_of(&[(Category::Warning, "Warning.m4a")]);
    let barrier = Arc::new(Barrier::new(SUBMITTERS));

    let submitters: Vec<_> = (0..SUBMITTERS)
        .map(|_| {
            let executor = executor.clone();
            let barrier = barrier.clone();
            let snapshot = snapshot.clone();
            thread::spawn(move || {
                barrier.wait();
                executor.submit(snapshot)
            })
        })
        .collect();
    let results: Vec<_> = submitters.into_iter().map(|h| h.join().unwrap()).collect();

    let (accepted, rejected): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    assert_eq!(accepted.len(), 1);
    assert_eq!(rejected.len(), SUBMITTERS - 1);
    assert!(rejected.iter().all(|r| matches!(r, Err(SubmitError::Busy))));

    player.open();
    let task = accepted.into_iter().next().unwrap().unwrap();
    assert_eq!(task.wait().await.unwrap().played, 1);
    assert_eq!(player.plays(), 1);
    assert_eq!(executor.run_state(), RunState::Idle);

    let submissions = log
        .entries()
        .iter()
        .filter(|e| e.message.starts_with("Test Alert triggered"))
        .count();
    assert_eq!(submissions, 1);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_unwritable_log_does_not_interrupt_playback() {
    let player = Arc::new(ScriptedPlayer::default());
    let (executor, log, _rx) = executor_with_log(player.clone(), EventLog::open("/dev/full").unwrap());

    let result = executor
        .submit(snapshot_of(&[
            (Category::Warning, "Warning.m4a"),
            (Category::Message, "Program started.m4a"),
            (Category::Reason, "Unknown.m4a"),
        ]))
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert_eq!(result.played, 3);
    assert_eq!(player.attempts(), vec!["Warning.m4a", "Program started.m4a", "Unknown.m4a"]);
    assert_eq!(log.len(), 4);
    assert!(log.entries().iter().all(|e| e.level == LogLevel::Info));
}
