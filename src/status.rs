//! Prints status updates from the playback engine as they arrive

use std::io::Write;
use std::time::Duration;

use klaxon_core::{StatusReceiver, StatusUpdate};
use tokio::task::JoinHandle;

/// How long shutdown waits for queued updates to be printed
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Render one update the way the prompt shows it
pub fn render(update: &StatusUpdate) -> String {
    match update {
        StatusUpdate::PlaybackError { .. } => format!("[playback error] {}", update.status_text()),
        StatusUpdate::Aborted { .. } => format!("[error] {}", update.status_text()),
        _ => format!("[status] {}", update.status_text()),
    }
}

pub fn spawn_status_printer(status_rx: StatusReceiver) -> JoinHandle<()> {
    spawn_status_writer(status_rx, std::io::stdout())
}

/// Write every update to `out` until all senders are gone
pub fn spawn_status_writer<W>(mut status_rx: StatusReceiver, mut out: W) -> JoinHandle<()>
where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(update) = status_rx.recv().await {
            if let Err(e) = writeln!(out, "{}", render(&update)).and_then(|()| out.flush()) {
                tracing::warn!(error = %e, "status output closed");
                break;
            }
        }
    })
}

/// Wait for the printer to flush what is queued. The status senders must
/// already be dropped, otherwise this gives up after a short timeout.
pub async fn drain_printer(printer: JoinHandle<()>) {
    match tokio::time::timeout(DRAIN_TIMEOUT, printer).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "status printer failed"),
        Err(_) => tracing::warn!("status printer still busy at shutdown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klaxon_core::{Category, ClipId, RunResult, status_channel};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(String::from)
                .collect()
        }
    }

    #[tokio::test]
    async fn test_drain_prints_updates_queued_before_shutdown() {
        let (tx, rx) = status_channel();
        let out = SharedBuf::default();

        // Queue the tail of a run before the printer gets a chance to poll
        tx.send(StatusUpdate::Started { task_id: 7, clips: 1 }).unwrap();
        tx.send(StatusUpdate::Finished {
            task_id: 7,
            result: RunResult {
                played: 1,
                ..RunResult::default()
            },
        })
        .unwrap();
        let printer = spawn_status_writer(rx, out.clone());
        drop(tx);

        drain_printer(printer).await;

        assert_eq!(
            out.lines(),
            vec!["[status] Playing sequence...", "[status] Played 1 alert"]
        );
    }

    #[test]
    fn test_render_prefixes() {
        let started = StatusUpdate::Started { task_id: 1, clips: 2 };
        assert_eq!(render(&started), "[status] Playing sequence...");

        let failed = StatusUpdate::PlaybackError {
            clip: ClipId::from("Warning.m4a"),
            cause: "no device".to_string(),
        };
        assert_eq!(render(&failed), "[playback error] Could not play Warning.m4a: no device");

        let played = StatusUpdate::ClipPlayed {
            category: Category::Reason,
            description: "UNKNOWN ISSUE",
        };
        assert_eq!(render(&played), "[status] Played Reasons alert: UNKNOWN ISSUE");

        let finished = StatusUpdate::Finished {
            task_id: 1,
            result: RunResult::default(),
        };
        assert_eq!(render(&finished), "[status] Played 0 alerts");
    }
}
