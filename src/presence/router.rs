//! Presence router implementation

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, RwLock};

use crate::error::{Error, Result};
use crate::validate::{valid_message, valid_username};

use super::event::{ChatMessage, ConnectionId, RoomEvent};

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Per-room state
struct Room {
    /// Fan-out channel; every member holds a receiver
    tx: broadcast::Sender<RoomEvent>,
    /// Current members
    members: HashSet<ConnectionId>,
    /// High-water chat timestamp, keeps per-room timestamps non-decreasing
    last_chat_ms: u64,
}

impl Room {
    fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            members: HashSet::new(),
            last_chat_ms: 0,
        }
    }
}

/// Mutable router state behind one lock
///
/// A single lock over both maps serializes all membership mutations, which
/// is what makes per-room count sequences reflect the true event order.
#[derive(Default)]
struct RouterState {
    rooms: HashMap<String, Room>,
    memberships: HashMap<ConnectionId, String>,
}

impl RouterState {
    /// Remove `conn` from `room`, broadcast the post-removal count to the
    /// remaining members, and drop the room when it empties.
    fn leave(&mut self, room: &str, conn: ConnectionId) {
        if let Some(entry) = self.rooms.get_mut(room) {
            entry.members.remove(&conn);
            let count = entry.members.len();
            let _ = entry.tx.send(RoomEvent::ViewerCount(count));
            if count == 0 {
                self.rooms.remove(room);
            }
        }
    }
}

/// Router for viewer connections, room membership and chat relay
///
/// Each connection is in at most one room. Rooms have no record of their
/// own; a room exists exactly while it has members.
pub struct PresenceRouter {
    state: RwLock<RouterState>,
    next_connection_id: AtomicU64,
    broadcast_capacity: usize,
}

impl PresenceRouter {
    /// Create a router with the default broadcast capacity
    pub fn new() -> Self {
        Self::with_capacity(crate::config::Config::default().broadcast_capacity)
    }

    /// Create a router with a custom per-room broadcast capacity
    pub fn with_capacity(broadcast_capacity: usize) -> Self {
        Self {
            state: RwLock::new(RouterState::default()),
            next_connection_id: AtomicU64::new(1),
            broadcast_capacity: broadcast_capacity.max(1),
        }
    }

    /// Register a new live connection and assign its id
    pub fn connect(&self) -> ConnectionId {
        ConnectionId(self.next_connection_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Join a room
    ///
    /// Room names carry the username character class (4-32 alphanumeric),
    /// not the stream-key class: the join-time identifier is the
    /// client-facing identity, not the raw credential. The two checks are
    /// intentionally different.
    ///
    /// A connection already in a room leaves it first (that room sees its
    /// post-departure count) rather than lingering as a ghost member.
    ///
    /// On success, broadcasts the new count to every member including the
    /// joiner, and returns the count together with the joiner's event
    /// receiver.
    pub async fn join(
        &self,
        conn: ConnectionId,
        room: &str,
    ) -> Result<(usize, broadcast::Receiver<RoomEvent>)> {
        if !valid_username(room) {
            return Err(Error::Validation("room name"));
        }

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if let Some(prev) = state.memberships.remove(&conn) {
            if prev != room {
                state.leave(&prev, conn);
            }
        }
        state.memberships.insert(conn, room.to_string());

        let entry = state
            .rooms
            .entry(room.to_string())
            .or_insert_with(|| Room::new(self.broadcast_capacity));
        entry.members.insert(conn);
        let count = entry.members.len();

        // Subscribe before sending so the joiner sees its own count update
        let rx = entry.tx.subscribe();
        let _ = entry.tx.send(RoomEvent::ViewerCount(count));

        tracing::debug!(connection = %conn, room = %room, viewers = count, "Joined room");
        Ok((count, rx))
    }

    /// Relay a chat message to the sender's room
    ///
    /// Returns `false` when the message is dropped: no current membership,
    /// invalid username, or invalid message. Drops are silent towards the
    /// sender by design.
    pub async fn send_message(&self, conn: ConnectionId, username: &str, message: &str) -> bool {
        if !valid_username(username) || !valid_message(message) {
            tracing::debug!(connection = %conn, "Chat dropped: invalid input");
            return false;
        }

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let Some(room_name) = state.memberships.get(&conn) else {
            tracing::debug!(connection = %conn, "Chat dropped: not in a room");
            return false;
        };
        let Some(room) = state.rooms.get_mut(room_name) else {
            return false;
        };

        let date_ms = unix_millis().max(room.last_chat_ms);
        room.last_chat_ms = date_ms;

        let _ = room.tx.send(RoomEvent::Chat(ChatMessage {
            username: username.to_string(),
            message: message.to_string(),
            date_ms,
        }));
        true
    }

    /// Handle a connection going away
    ///
    /// No-op for connections without a membership. Otherwise the remaining
    /// members receive the post-removal count.
    pub async fn disconnect(&self, conn: ConnectionId) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let Some(room) = state.memberships.remove(&conn) else {
            return;
        };
        state.leave(&room, conn);
        tracing::debug!(connection = %conn, room = %room, "Disconnected");
    }

    /// Current viewer count of a room (0 for unknown rooms)
    pub async fn viewer_count(&self, room: &str) -> usize {
        self.state
            .read()
            .await
            .rooms
            .get(room)
            .map(|r| r.members.len())
            .unwrap_or(0)
    }
}

impl Default for PresenceRouter {
    fn default() -> Self {
        Self::new()
    }
}
