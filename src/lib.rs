//! livecast — live-stream session and real-time presence manager
//!
//! The in-memory core of a live-streaming service: tracks which streams are
//! currently broadcasting, supervises one external transcoding worker per
//! active stream, and relays chat and viewer-count updates to everyone
//! watching.
//!
//! # Components
//!
//! - [`validate`] — pure predicates over untrusted strings, gating every
//!   state-mutating operation
//! - [`worker`] — spawn/signal/observe the external transcoding process and
//!   clean up its thumbnail artifact
//! - [`registry`] — the stream-key → session map with start/stop/query
//!   operations
//! - [`presence`] — connection → room membership, viewer counts and chat
//!   fan-out
//! - [`accounts`] — the injectable account-storage boundary
//! - [`keys`] — stream-key and user-ID generation
//! - [`api`] — JSON response shapes for the HTTP gateway
//!
//! The HTTP endpoints and the persistent-connection transport themselves
//! live outside this crate; they validate request shape and call into the
//! registry and router here.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use livecast::{Config, MemoryAccounts, PresenceRouter, StreamRegistry};
//!
//! # async fn run() -> livecast::Result<()> {
//! let accounts = Arc::new(MemoryAccounts::new());
//! accounts.insert(livecast::keys::generate_stream_key(), "alice").await;
//!
//! let registry = StreamRegistry::with_config(
//!     Config::default().worker_command("/usr/local/bin/transcode"),
//!     accounts,
//! );
//! let router = PresenceRouter::new();
//!
//! let conn = router.connect();
//! let (viewers, events) = router.join(conn, "alice").await?;
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod api;
pub mod config;
pub mod error;
pub mod keys;
pub mod presence;
pub mod registry;
pub mod validate;
pub mod worker;

pub use accounts::{AccountStore, MemoryAccounts};
pub use config::Config;
pub use error::{Error, Result};
pub use presence::{ChatMessage, ConnectionId, PresenceRouter, RoomEvent};
pub use registry::{StreamRegistry, StreamSession};
pub use worker::{WorkerHandle, WorkerSupervisor};
