#![allow(dead_code)]

//! Persistence port for per-user engine state.
//!
//! The swipe window outlives the process, so the controller persists it
//! through an injected get/put-by-key trait rather than ambient storage.
//! `SwipeSessionController` holds an `Arc<dyn StateStore>`; production uses
//! Redis, tests and the fail-open path use the in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Key under which a user's swipe window is persisted.
pub fn swipe_key(user_id: &str) -> String {
    format!("swipe_{user_id}")
}

/// The persistence port. Implement this to swap storage backends without
/// touching the controller.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Production store over Redis.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StateStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn.get(key).await?)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }
}

/// In-memory store — the test fake, and the per-session fallback when Redis
/// is unreachable (the server still enforces the authoritative limit).
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("state store mutex poisoned")
            .get(key)
            .cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("state store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
