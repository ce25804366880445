//! Stream key and user ID generation
//!
//! Credentials are random bytes, lowercase-hex encoded: 32 bytes for stream
//! keys (64 chars) and 8 bytes for user IDs (16 chars). A freshly generated
//! key must be checked against the account store before being accepted;
//! a collision is reported, not retried.

use std::fmt::Write;

use rand::RngCore;

use crate::accounts::AccountStore;
use crate::error::{Error, Result};

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);

    let mut out = String::with_capacity(bytes * 2);
    for b in buf {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Generate a new stream key (64 lowercase-hex characters).
pub fn generate_stream_key() -> String {
    random_hex(32)
}

/// Generate a new user ID (16 lowercase-hex characters).
pub fn generate_uid() -> String {
    random_hex(8)
}

/// Generate a stream key and verify it against existing keys.
///
/// Returns [`Error::KeyCollision`] if the generated key is already taken.
/// Used at registration and on key rotation.
pub async fn issue_stream_key(store: &dyn AccountStore) -> Result<String> {
    let key = generate_stream_key();
    if store.key_exists(&key).await? {
        return Err(Error::KeyCollision);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::MemoryAccounts;
    use crate::validate::{valid_stream_key, valid_uid};

    #[test]
    fn test_generated_key_passes_validator() {
        for _ in 0..16 {
            assert!(valid_stream_key(&generate_stream_key()));
        }
    }

    #[test]
    fn test_generated_uid_passes_validator() {
        for _ in 0..16 {
            assert!(valid_uid(&generate_uid()));
        }
    }

    #[test]
    fn test_keys_are_distinct() {
        assert_ne!(generate_stream_key(), generate_stream_key());
    }

    #[tokio::test]
    async fn test_issue_stream_key() {
        let accounts = MemoryAccounts::new();
        let key = issue_stream_key(&accounts).await.unwrap();
        assert!(valid_stream_key(&key));
    }
}
