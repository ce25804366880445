//! Stream registry
//!
//! The single source of truth for which streams are currently broadcasting.
//! Each entry binds an active stream key to its owning username and the
//! supervised transcoding worker.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<StreamRegistry>
//!                  ┌────────────────────────────┐
//!                  │ sessions: HashMap<Key,     │
//!                  │   StreamSession {          │
//!                  │     username,              │
//!                  │     worker: WorkerHandle,  │
//!                  │   }                        │
//!                  │ >                          │
//!                  └──────┬──────────────┬──────┘
//!                         │              │
//!             start_stream│              │stop_stream
//!                         ▼              ▼
//!            AccountStore lookup    SIGTERM + thumbnail
//!            + worker spawn         cleanup + remove
//! ```
//!
//! Registry state is process-local: a restart loses all sessions and orphans
//! any workers still running. That is an accepted property of the design, not
//! a recovery path.

pub mod session;
pub mod store;

pub use session::StreamSession;
pub use store::StreamRegistry;
