//! Per-stream session record

use crate::worker::WorkerHandle;

/// Registry record for one active broadcast
///
/// Exactly one session may exist per stream key at any time. The worker
/// handle stays valid after the process dies; liveness is observable via
/// [`WorkerHandle::has_exited`], and only an explicit stop removes the
/// record.
#[derive(Debug, Clone)]
pub struct StreamSession {
    /// Stream key the broadcast was started with
    pub stream_key: String,

    /// Username owning the stream key
    pub username: String,

    /// Handle to the supervised transcoding worker
    pub worker: WorkerHandle,
}

impl StreamSession {
    /// Create a new session record
    pub fn new(
        stream_key: impl Into<String>,
        username: impl Into<String>,
        worker: WorkerHandle,
    ) -> Self {
        Self {
            stream_key: stream_key.into(),
            username: username.into(),
            worker,
        }
    }
}
