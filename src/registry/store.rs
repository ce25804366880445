//! Stream registry implementation
//!
//! Start/stop/query operations over the set of active broadcasts, consumed
//! by the HTTP layer. The presence router is deliberately independent: rooms
//! outlive the streams they are named after.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::accounts::AccountStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::validate::valid_stream_key;
use crate::worker::{WorkerHandle, WorkerSupervisor};

use super::session::StreamSession;

/// Central registry for all active streams
///
/// Thread-safe via `RwLock`. `start_stream` holds the write lock across the
/// owner lookup and worker spawn, which keeps check-then-insert atomic for
/// concurrent starts presenting the same key.
pub struct StreamRegistry {
    /// Map of stream key to session record
    sessions: RwLock<HashMap<String, StreamSession>>,

    /// Account storage boundary (key -> owner resolution)
    accounts: Arc<dyn AccountStore>,

    /// Supervisor owning worker processes and thumbnail cleanup
    supervisor: WorkerSupervisor,

    /// Optional bounded wait for worker exit during stop
    worker_exit_timeout: Option<Duration>,
}

impl StreamRegistry {
    /// Create a registry with default configuration
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self::with_config(Config::default(), accounts)
    }

    /// Create a registry with custom configuration
    pub fn with_config(config: Config, accounts: Arc<dyn AccountStore>) -> Self {
        let worker_exit_timeout = config.worker_exit_timeout;
        Self {
            sessions: RwLock::new(HashMap::new()),
            accounts,
            supervisor: WorkerSupervisor::new(config),
            worker_exit_timeout,
        }
    }

    /// Start a broadcast for `stream_key`
    ///
    /// Rejects malformed keys, keys already broadcasting, and keys that do
    /// not resolve to exactly one account. On success the transcoding worker
    /// is running and the session is recorded.
    ///
    /// A worker that dies after launch does not remove the session; callers
    /// that care check [`WorkerHandle::has_exited`] via
    /// [`StreamRegistry::worker_handle`].
    pub async fn start_stream(&self, stream_key: &str) -> Result<()> {
        if !valid_stream_key(stream_key) {
            return Err(Error::Validation("stream key"));
        }

        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(stream_key) {
            return Err(Error::AlreadyActive(stream_key.to_string()));
        }

        // Exactly one owner row is required; zero or multiple matches means
        // the key does not authorize a broadcast.
        let mut owners = self.accounts.owners_of_key(stream_key).await?;
        if owners.len() != 1 {
            return Err(Error::NotAuthorized);
        }
        let Some(username) = owners.pop() else {
            return Err(Error::NotAuthorized);
        };

        let worker = self.supervisor.spawn(stream_key, &username)?;

        tracing::info!(stream = %stream_key, username = %username, "Stream started");
        sessions.insert(
            stream_key.to_string(),
            StreamSession::new(stream_key, username, worker),
        );

        Ok(())
    }

    /// Stop the broadcast for `stream_key`
    ///
    /// Malformed or inactive keys are silently ignored. Otherwise the worker
    /// is signaled (fire-and-forget) and the thumbnail cleaned up; the
    /// session is removed only after a successful cleanup attempt, so a
    /// fatal cleanup error propagates and leaves the entry in place.
    pub async fn stop_stream(&self, stream_key: &str) -> Result<()> {
        if !valid_stream_key(stream_key) {
            return Ok(());
        }

        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.get(stream_key) else {
            return Ok(());
        };

        session.worker.request_terminate();

        if let Some(timeout) = self.worker_exit_timeout {
            if tokio::time::timeout(timeout, session.worker.exited())
                .await
                .is_err()
            {
                tracing::warn!(stream = %stream_key, "Worker still running after stop timeout");
            }
        }

        self.supervisor.cleanup_thumbnail(&session.username).await?;

        sessions.remove(stream_key);
        tracing::info!(stream = %stream_key, "Stream stopped");

        Ok(())
    }

    /// Whether `stream_key` is currently broadcasting
    pub async fn is_active(&self, stream_key: &str) -> bool {
        self.sessions.read().await.contains_key(stream_key)
    }

    /// Snapshot of all usernames currently broadcasting (order insignificant)
    pub async fn live_usernames(&self) -> Vec<String> {
        self.sessions
            .read()
            .await
            .values()
            .map(|s| s.username.clone())
            .collect()
    }

    /// Whether some active stream is owned by `username`
    pub async fn is_user_live(&self, username: &str) -> bool {
        self.sessions
            .read()
            .await
            .values()
            .any(|s| s.username == username)
    }

    /// Worker handle for an active stream, if any
    pub async fn worker_handle(&self, stream_key: &str) -> Option<WorkerHandle> {
        self.sessions
            .read()
            .await
            .get(stream_key)
            .map(|s| s.worker.clone())
    }

    /// Number of active sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::accounts::MemoryAccounts;

    use super::*;

    fn test_key() -> String {
        "a".repeat(64)
    }

    async fn test_registry(dir: &TempDir) -> StreamRegistry {
        let accounts = MemoryAccounts::new();
        accounts.insert(test_key(), "alice").await;

        let config = Config::default()
            .worker_command("yes")
            .thumbnail_dir(dir.path());
        StreamRegistry::with_config(config, Arc::new(accounts))
    }

    #[tokio::test]
    async fn test_start_stream() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;
        let key = test_key();

        registry.start_stream(&key).await.unwrap();
        assert!(registry.is_active(&key).await);
        assert_eq!(registry.session_count().await, 1);

        let handle = registry.worker_handle(&key).await.unwrap();
        assert!(!handle.has_exited());

        registry.stop_stream(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_start_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;
        let key = test_key();

        registry.start_stream(&key).await.unwrap();
        let result = registry.start_stream(&key).await;
        assert!(matches!(result, Err(Error::AlreadyActive(_))));
        assert_eq!(registry.session_count().await, 1);

        registry.stop_stream(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_malformed_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;

        let result = registry.start_stream("not-a-key").await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_start_unknown_key_not_authorized() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;

        let result = registry.start_stream(&"b".repeat(64)).await;
        assert!(matches!(result, Err(Error::NotAuthorized)));
    }

    #[tokio::test]
    async fn test_spawn_failure_inserts_nothing() {
        let accounts = MemoryAccounts::new();
        accounts.insert(test_key(), "alice").await;

        let dir = tempfile::tempdir().unwrap();
        let config = Config::default()
            .worker_command("/nonexistent/transcode")
            .thumbnail_dir(dir.path());
        let registry = StreamRegistry::with_config(config, Arc::new(accounts));

        assert!(registry.start_stream(&test_key()).await.is_err());
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_absent_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;

        registry.stop_stream(&test_key()).await.unwrap();
        registry.stop_stream("garbage").await.unwrap();
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_removes_session_and_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;
        let key = test_key();

        registry.start_stream(&key).await.unwrap();
        let thumbnail = dir.path().join("alice.png");
        std::fs::write(&thumbnail, b"png").unwrap();

        let handle = registry.worker_handle(&key).await.unwrap();
        registry.stop_stream(&key).await.unwrap();

        assert!(!registry.is_active(&key).await);
        assert!(!thumbnail.exists());

        tokio::time::timeout(std::time::Duration::from_secs(5), handle.exited())
            .await
            .expect("worker did not exit after stop");
    }

    #[tokio::test]
    async fn test_stop_cleanup_failure_keeps_session() {
        let accounts = MemoryAccounts::new();
        accounts.insert(test_key(), "alice").await;

        // Thumbnail dir pointing at a regular file: cleanup fails with a
        // non-NotFound error and the entry must stay.
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("file");
        std::fs::write(&not_a_dir, b"x").unwrap();

        let config = Config::default()
            .worker_command("yes")
            .thumbnail_dir(&not_a_dir);
        let registry = StreamRegistry::with_config(config, Arc::new(accounts));

        registry.start_stream(&test_key()).await.unwrap();
        assert!(registry.stop_stream(&test_key()).await.is_err());
        assert_eq!(registry.session_count().await, 1);

        // Leave no worker behind
        registry.worker_handle(&test_key()).await.unwrap().request_terminate();
    }

    #[tokio::test]
    async fn test_live_usernames() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(&dir).await;
        let key = test_key();

        assert!(registry.live_usernames().await.is_empty());
        assert!(!registry.is_user_live("alice").await);

        registry.start_stream(&key).await.unwrap();
        assert_eq!(registry.live_usernames().await, vec!["alice".to_string()]);
        assert!(registry.is_user_live("alice").await);
        assert!(!registry.is_user_live("bob").await);

        registry.stop_stream(&key).await.unwrap();
        assert!(!registry.is_user_live("alice").await);
    }
}
