//! Manager configuration

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the session manager
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the transcoding worker executable
    ///
    /// Invoked as `<worker_command> <stream_key> <username>` with stdio
    /// detached.
    pub worker_command: PathBuf,

    /// Directory holding per-stream thumbnails (`<username>.png`)
    pub thumbnail_dir: PathBuf,

    /// Capacity of each room's broadcast channel
    ///
    /// Receivers that fall behind by more than this many events observe a
    /// lagged error and skip ahead.
    pub broadcast_capacity: usize,

    /// How long `stop_stream` waits for the worker to exit after signaling it
    ///
    /// `None` (the default) means no wait at all: termination is
    /// fire-and-forget and a worker that ignores the signal leaks. There is
    /// deliberately no kill escalation either way; callers needing
    /// confirmation await [`crate::WorkerHandle::exited`].
    pub worker_exit_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_command: PathBuf::from("./transcode"),
            thumbnail_dir: PathBuf::from("./thumbnails"),
            broadcast_capacity: 64,
            worker_exit_timeout: None,
        }
    }
}

impl Config {
    /// Set the worker executable path
    pub fn worker_command(mut self, path: impl Into<PathBuf>) -> Self {
        self.worker_command = path.into();
        self
    }

    /// Set the thumbnail directory
    pub fn thumbnail_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.thumbnail_dir = dir.into();
        self
    }

    /// Set the room broadcast channel capacity
    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity.max(1);
        self
    }

    /// Set a bounded wait for worker exit during stop
    pub fn worker_exit_timeout(mut self, timeout: Duration) -> Self {
        self.worker_exit_timeout = Some(timeout);
        self
    }
}
