//! Handle to a supervised worker process

use tokio::sync::watch;

/// Handle to one transcoding worker process
///
/// Cheap to clone; all clones observe the same process. The child itself is
/// owned by a monitor task that reaps it on exit and flips the exit flag.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    pid: Option<u32>,
    exited: watch::Receiver<bool>,
}

impl WorkerHandle {
    pub(super) fn new(pid: Option<u32>, exited: watch::Receiver<bool>) -> Self {
        Self { pid, exited }
    }

    /// OS pid of the worker, if it launched
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Whether the worker process has exited
    pub fn has_exited(&self) -> bool {
        *self.exited.borrow()
    }

    /// Request termination of the worker (fire-and-forget)
    ///
    /// Delivers SIGTERM and returns without waiting. There is no retry and no
    /// SIGKILL escalation; a worker that ignores the signal keeps running.
    /// A worker already observed as exited is not signaled, so a reaped pid
    /// is never reused as a target (a small window remains between the check
    /// and the signal).
    pub fn request_terminate(&self) {
        if self.has_exited() {
            return;
        }
        let Some(pid) = self.pid else {
            return;
        };

        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if rc == 0 {
            tracing::debug!(pid, "Worker termination requested");
        } else {
            tracing::warn!(pid, "Failed to signal worker");
        }
    }

    /// Wait until the worker process has exited
    pub async fn exited(&self) {
        let mut rx = self.exited.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Monitor task gone; nothing left to observe
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exited_observes_flag() {
        let (tx, rx) = watch::channel(false);
        let handle = WorkerHandle::new(Some(1), rx);

        assert!(!handle.has_exited());
        tx.send(true).unwrap();
        assert!(handle.has_exited());

        // Resolves immediately once the flag is set
        handle.exited().await;
    }

    #[tokio::test]
    async fn test_terminate_after_exit_is_noop() {
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        // pid 1 would be init; the exit flag must short-circuit the signal
        let handle = WorkerHandle::new(Some(1), rx);
        handle.request_terminate();
    }

    #[tokio::test]
    async fn test_terminate_without_pid_is_noop() {
        let (_tx, rx) = watch::channel(false);
        let handle = WorkerHandle::new(None, rx);
        handle.request_terminate();
    }
}
