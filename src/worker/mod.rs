//! Transcoding worker supervision
//!
//! Each active stream owns one external transcoding process, launched as
//! `<worker_command> <stream_key> <username>` with its stdio detached. The
//! supervisor owns the lifecycle edges only; the process itself is opaque.
//!
//! Termination is two-phase: [`WorkerHandle::request_terminate`] delivers a
//! SIGTERM and returns immediately (no retry, no SIGKILL escalation), while
//! [`WorkerHandle::exited`] makes the actual exit separately observable.
//! Worker exit never mutates registry state by itself; it is logged and left
//! for an explicit stop to act on.

pub mod handle;
pub mod supervisor;

pub use handle::WorkerHandle;
pub use supervisor::WorkerSupervisor;
