//! Account store boundary
//!
//! Persistent account storage lives outside this crate; the registry only
//! needs two lookups at that boundary, expressed as the [`AccountStore`]
//! trait. [`MemoryAccounts`] is the in-memory backend used by tests and
//! embedders without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

/// Lookup interface the registry requires from persistent account storage.
///
/// Implementations back onto SQL, a key-value store, or memory. Fallible
/// operations surface store faults as [`crate::Error::Internal`]; the
/// registry treats those as fatal to the request.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All usernames owning `stream_key`.
    ///
    /// Mirrors a result-set lookup: the registry demands exactly one row and
    /// rejects zero or multiple matches as unauthorized.
    async fn owners_of_key(&self, stream_key: &str) -> Result<Vec<String>>;

    /// Whether `stream_key` is already assigned to any account.
    ///
    /// Collision check for freshly generated keys.
    async fn key_exists(&self, stream_key: &str) -> Result<bool>;
}

/// In-memory account store: stream key -> owning username.
#[derive(Default)]
pub struct MemoryAccounts {
    keys: RwLock<HashMap<String, String>>,
}

impl MemoryAccounts {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `stream_key` to `username`
    pub async fn insert(&self, stream_key: impl Into<String>, username: impl Into<String>) {
        self.keys
            .write()
            .await
            .insert(stream_key.into(), username.into());
    }

    /// Remove a stream key assignment
    pub async fn remove(&self, stream_key: &str) {
        self.keys.write().await.remove(stream_key);
    }
}

#[async_trait]
impl AccountStore for MemoryAccounts {
    async fn owners_of_key(&self, stream_key: &str) -> Result<Vec<String>> {
        let keys = self.keys.read().await;
        Ok(keys.get(stream_key).cloned().into_iter().collect())
    }

    async fn key_exists(&self, stream_key: &str) -> Result<bool> {
        Ok(self.keys.read().await.contains_key(stream_key))
    }
}
