// ABOUTME: Best-effort TTL'd key-value handoff of finished plans between requests
// ABOUTME: In-memory implementation with lazy expiry; loss of an entry is never an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::errors::AppResult;
use dashmap::DashMap;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

/// Ephemeral storage for handing a finished plan to a follow-up request
///
/// Best-effort by contract: entries may vanish at any time, and callers must
/// treat a miss as "regenerate", never as a failure.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a value under a key for at most `ttl`
    ///
    /// # Errors
    ///
    /// Remote-backed implementations may fail to write
    async fn put(&self, key: &str, value: Value, ttl: Duration) -> AppResult<()>;

    /// Fetch a value if it is still present and unexpired
    ///
    /// # Errors
    ///
    /// Remote-backed implementations may fail to read; an absent key is
    /// `Ok(None)`, not an error
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Drop a key, if present
    ///
    /// # Errors
    ///
    /// Remote-backed implementations may fail to delete
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Process-local session store with lazy expiry
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: DashMap<String, (Value, Instant)>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, key: &str, value: Value, ttl: Duration) -> AppResult<()> {
        self.entries
            .insert(key.to_owned(), (value, Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            let (value, expires_at) = entry.value();
            if now < *expires_at {
                return Ok(Some(value.clone()));
            }
        }
        self.entries.remove_if(key, |_, (_, expires_at)| now >= *expires_at);
        Ok(None)
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_remove() {
        let store = InMemorySessionStore::new();
        store
            .put("plan:abc", json!({"goal": "maintenance"}), Duration::from_secs(60))
            .await
            .unwrap();
        let value = store.get("plan:abc").await.unwrap().unwrap();
        assert_eq!(value["goal"], "maintenance");

        store.remove("plan:abc").await.unwrap();
        assert!(store.get("plan:abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_miss() {
        tokio::time::pause();
        let store = InMemorySessionStore::new();
        store
            .put("plan:abc", json!(1), Duration::from_secs(5))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(store.get("plan:abc").await.unwrap().is_none());
    }
}
