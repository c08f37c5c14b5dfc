use tokio::task::JoinHandle;

use super::TaskError;
use crate::sequencer::RunResult;

/// Handle to one submitted run.
///
/// Dropping the handle does not stop the run; it always plays to the end.
#[derive(Debug)]
pub struct PlaybackTask {
    id: u64,
    handle: JoinHandle<Result<RunResult, TaskError>>,
}

impl PlaybackTask {
    pub(crate) fn new(id: u64, handle: JoinHandle<Result<RunResult, TaskError>>) -> Self {
        Self { id, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run to complete
    pub async fn wait(self) -> Result<RunResult, TaskError> {
        self.handle.await?
    }
}
