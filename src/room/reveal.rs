use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cancellable handle for the delayed result broadcast of a room
///
/// At most one reveal is pending at a time; scheduling a new one aborts the old.
#[derive(Debug, Default)]
pub struct RevealTimer {
    pending: Option<JoinHandle<()>>,
}

impl RevealTimer {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Runs `task` after `delay` unless cancelled first
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        debug!(delay_ms = delay.as_millis() as u64, "Scheduling result reveal");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Aborts the pending reveal. Returns true if one was still waiting to fire.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                if was_pending {
                    debug!("Cancelled pending result reveal");
                }
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
