//! Real-time presence and chat
//!
//! Maps each live connection to the stream room it has joined, keeps
//! per-room viewer counts, and relays chat and count updates to every
//! connection in a room via `tokio::sync::broadcast` fan-out.
//!
//! # Architecture
//!
//! ```text
//!                         PresenceRouter
//!              ┌────────────────────────────────┐
//!              │ memberships: ConnectionId→room │
//!              │ rooms: room → Room {           │
//!              │   tx: broadcast::Sender,       │
//!              │   members: HashSet<ConnId>,    │
//!              │ }                              │
//!              └───────────────┬────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!         [viewer rx]     [viewer rx]     [viewer rx]
//!         recv().await    recv().await    recv().await
//! ```
//!
//! Rooms are independent of the stream registry: stopping a stream leaves
//! its room and members untouched.
//!
//! Viewer-count events are snapshots, not diffs; consumers treat each one as
//! authoritative. Per room, the count sequence observed by any member
//! reflects the true join/disconnect order (serialized by the router's
//! lock); no ordering holds across rooms.

pub mod event;
pub mod router;

pub use event::{ChatMessage, ConnectionId, RoomEvent};
pub use router::PresenceRouter;
