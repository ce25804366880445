//! Room event types
//!
//! These cross the gateway boundary, so their serialized shapes match the
//! wire events the transport emits: `updateViewers` carries the snapshot
//! count, `message` carries `{username, message, date}` with a server-side
//! millisecond timestamp.

use serde::Serialize;

/// Opaque identifier for a live connection
///
/// Assigned by the router at connect time, valid until disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(pub(super) u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A chat message as broadcast to a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Display name of the sender
    pub username: String,
    /// Message body
    pub message: String,
    /// Server-assigned timestamp (ms since epoch), non-decreasing per room
    #[serde(rename = "date")]
    pub date_ms: u64,
}

/// Event broadcast to all members of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RoomEvent {
    /// Snapshot viewer count after a membership change
    #[serde(rename = "updateViewers")]
    ViewerCount(usize),
    /// Relayed chat message
    #[serde(rename = "message")]
    Chat(ChatMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_count_wire_shape() {
        let json = serde_json::to_value(RoomEvent::ViewerCount(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "updateViewers": 3 }));
    }

    #[test]
    fn test_chat_wire_shape() {
        let event = RoomEvent::Chat(ChatMessage {
            username: "alice".into(),
            message: "hello".into(),
            date_ms: 1700000000000,
        });
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": {
                    "username": "alice",
                    "message": "hello",
                    "date": 1700000000000u64,
                }
            })
        );
    }
}
