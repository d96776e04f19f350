pub mod memory;
pub mod sqlite;

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub struct StoreError(pub anyhow::Error);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<E> From<E> for StoreError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub hub_id: String,
    pub sender: String,
    pub text: String,
}

/// A message as submitted by a client, before the store assigns an id.
/// `sender` and `text` stay optional here; whether they are required is the
/// store's call (both implementations treat them as NOT NULL).
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub hub_id: String,
    pub sender: Option<String>,
    pub text: Option<String>,
}

/// Data access for hubs and their messages.
///
/// Hubs are schemaless JSON objects; the store assigns ids on insert. One
/// production implementation ([`sqlite::SqliteHubs`]) and one in-memory
/// implementation for tests ([`memory::MemoryHubs`]).
#[async_trait]
pub trait HubStore: Send + Sync {
    /// All hubs matching every key/value pair of `filter` (empty filter
    /// matches everything).
    async fn find(&self, filter: &HashMap<String, String>) -> StoreResult<Vec<Value>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Value>>;

    /// Inserts `hub` and returns it with the assigned id. Non-object values
    /// are rejected.
    async fn add(&self, hub: Value) -> StoreResult<Value>;

    /// Merges `patch` into the stored hub; `None` when the id is unknown.
    async fn update(&self, id: &str, patch: Value) -> StoreResult<Option<Value>>;

    /// Number of hubs deleted (0 or 1).
    async fn remove(&self, id: &str) -> StoreResult<u64>;

    async fn find_hub_messages(&self, hub_id: &str) -> StoreResult<Vec<Message>>;

    async fn add_message(&self, message: NewMessage) -> StoreResult<Message>;
}

/// Filter matching shared by both store implementations: string fields
/// compare directly, anything else through its JSON rendering, so
/// `?count=3` matches a numeric `3`.
pub(crate) fn matches_filter(hub: &Value, filter: &HashMap<String, String>) -> bool {
    filter.iter().all(|(key, want)| match hub.get(key) {
        Some(Value::String(s)) => s == want,
        Some(other) => other.to_string() == *want,
        None => false,
    })
}
