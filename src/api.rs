//! Gateway response payloads
//!
//! JSON shapes the HTTP gateway returns for session-manager calls. Every
//! response carries a `response` message string; payload fields ride
//! alongside it.

use serde::Serialize;

/// Bare acknowledgment with a message string
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub response: String,
}

impl ApiResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Response for the stream listing call
#[derive(Debug, Clone, Serialize)]
pub struct StreamsResponse {
    pub response: String,
    /// Owners of all currently active streams
    pub usernames: Vec<String>,
}

impl StreamsResponse {
    pub fn new(usernames: Vec<String>) -> Self {
        Self {
            response: "Success".into(),
            usernames,
        }
    }
}

/// Response carrying a stream key (issue or rotation)
#[derive(Debug, Clone, Serialize)]
pub struct StreamKeyResponse {
    pub response: String,
    #[serde(rename = "streamKey")]
    pub stream_key: String,
}

impl StreamKeyResponse {
    pub fn new(stream_key: impl Into<String>) -> Self {
        Self {
            response: "Success".into(),
            stream_key: stream_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_response_shape() {
        let json = serde_json::to_value(StreamsResponse::new(vec!["alice".into()])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "response": "Success", "usernames": ["alice"] })
        );
    }

    #[test]
    fn test_stream_key_response_shape() {
        let json = serde_json::to_value(StreamKeyResponse::new("abc123")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "response": "Success", "streamKey": "abc123" })
        );
    }
}
