//! Worker process lifecycle

use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::Result;

use super::handle::WorkerHandle;

/// Supervisor for external transcoding processes
///
/// Spawns one worker per active stream and cleans up the per-stream thumbnail
/// artifact on stop. Lifecycle events (exit, wait failure) are logged only
/// and never surfaced to the request that started the stream.
pub struct WorkerSupervisor {
    config: Config,
}

impl WorkerSupervisor {
    /// Create a supervisor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Launch a transcoding worker for a stream
    ///
    /// The worker is invoked as `<worker_command> <stream_key> <username>`
    /// with stdio discarded. A monitor task reaps the child and flips the
    /// handle's exit flag; exit does not remove any registry entry.
    ///
    /// Must be called within a tokio runtime. A launch failure is returned
    /// to the caller; once launched, all further faults are log-only.
    pub fn spawn(&self, stream_key: &str, username: &str) -> Result<WorkerHandle> {
        let mut child = Command::new(&self.config.worker_command)
            .arg(stream_key)
            .arg(username)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let pid = child.id();
        let (tx, rx) = watch::channel(false);
        let key = stream_key.to_string();

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    tracing::info!(stream = %key, status = %status, "Worker exited");
                }
                Err(e) => {
                    tracing::warn!(stream = %key, error = %e, "Worker wait failed");
                }
            }
            let _ = tx.send(true);
        });

        tracing::info!(stream = %stream_key, pid = ?pid, "Worker spawned");
        Ok(WorkerHandle::new(pid, rx))
    }

    /// Delete the thumbnail for `username`, if present
    ///
    /// Absence of the file is success. Any other deletion error is returned;
    /// callers must not treat the cleanup as done in that case.
    pub async fn cleanup_thumbnail(&self, username: &str) -> Result<()> {
        let path = self.config.thumbnail_dir.join(format!("{}.png", username));

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(username, path = %path.display(), "Thumbnail removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    // `yes` echoes its arguments forever; a convenient stand-in worker that
    // runs until signaled.
    fn test_supervisor(thumbnail_dir: &std::path::Path) -> WorkerSupervisor {
        WorkerSupervisor::new(
            Config::default()
                .worker_command("yes")
                .thumbnail_dir(thumbnail_dir),
        )
    }

    #[tokio::test]
    async fn test_spawn_and_terminate() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = test_supervisor(dir.path());

        let handle = supervisor.spawn(&"a".repeat(64), "alice").unwrap();
        assert!(handle.pid().is_some());
        assert!(!handle.has_exited());

        handle.request_terminate();
        tokio::time::timeout(Duration::from_secs(5), handle.exited())
            .await
            .expect("worker did not exit after SIGTERM");
        assert!(handle.has_exited());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_synchronous() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = WorkerSupervisor::new(
            Config::default()
                .worker_command("/nonexistent/transcode")
                .thumbnail_dir(dir.path()),
        );

        assert!(supervisor.spawn(&"a".repeat(64), "alice").is_err());
    }

    #[tokio::test]
    async fn test_cleanup_missing_thumbnail_ok() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = test_supervisor(dir.path());

        supervisor.cleanup_thumbnail("alice").await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_removes_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.png");
        std::fs::write(&path, b"png").unwrap();

        let supervisor = test_supervisor(dir.path());
        supervisor.cleanup_thumbnail("alice").await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_error_propagates() {
        // Point the thumbnail dir at a regular file: deletion fails with
        // something other than NotFound and must surface.
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("file");
        std::fs::write(&not_a_dir, b"x").unwrap();

        let supervisor = test_supervisor(&not_a_dir);
        assert!(supervisor.cleanup_thumbnail("alice").await.is_err());
    }
}
