use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{matches_filter, HubStore, Message, NewMessage, StoreError, StoreResult};

/// In-memory store for tests. Same semantics as [`super::sqlite::SqliteHubs`],
/// including the NOT NULL rejection of incomplete messages.
#[derive(Default)]
pub struct MemoryHubs {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    hubs: Vec<Value>,
    messages: Vec<Message>,
}

impl MemoryHubs {
    pub fn new() -> Self {
        Self::default()
    }
}

fn hub_id(hub: &Value) -> Option<&str> {
    hub.get("id").and_then(Value::as_str)
}

#[async_trait]
impl HubStore for MemoryHubs {
    async fn find(&self, filter: &HashMap<String, String>) -> StoreResult<Vec<Value>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .hubs
            .iter()
            .filter(|hub| matches_filter(hub, filter))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Value>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.hubs.iter().find(|hub| hub_id(hub) == Some(id)).cloned())
    }

    async fn add(&self, hub: Value) -> StoreResult<Value> {
        let Value::Object(mut obj) = hub else {
            return Err(StoreError(anyhow!("hub must be a JSON object")));
        };

        let id = Uuid::now_v7().to_string();
        obj.insert("id".to_owned(), Value::String(id));
        let hub = Value::Object(obj);

        let mut inner = self.inner.lock().unwrap();
        inner.hubs.push(hub.clone());
        Ok(hub)
    }

    async fn update(&self, id: &str, patch: Value) -> StoreResult<Option<Value>> {
        let Value::Object(patch) = patch else {
            return Err(StoreError(anyhow!("hub patch must be a JSON object")));
        };

        let mut inner = self.inner.lock().unwrap();
        let Some(hub) = inner.hubs.iter_mut().find(|hub| hub_id(hub) == Some(id)) else {
            return Ok(None);
        };

        let obj = hub.as_object_mut().unwrap();
        for (key, value) in patch {
            obj.insert(key, value);
        }
        obj.insert("id".to_owned(), Value::String(id.to_owned()));
        Ok(Some(hub.clone()))
    }

    async fn remove(&self, id: &str) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.hubs.len();
        inner.hubs.retain(|hub| hub_id(hub) != Some(id));
        Ok((before - inner.hubs.len()) as u64)
    }

    async fn find_hub_messages(&self, hub_id: &str) -> StoreResult<Vec<Message>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .messages
            .iter()
            .filter(|message| message.hub_id == hub_id)
            .cloned()
            .collect())
    }

    async fn add_message(&self, message: NewMessage) -> StoreResult<Message> {
        let (Some(sender), Some(text)) = (message.sender, message.text) else {
            return Err(StoreError(anyhow!(
                "NOT NULL constraint failed: messages.sender / messages.text"
            )));
        };

        let message = Message {
            id: Uuid::now_v7().to_string(),
            hub_id: message.hub_id,
            sender,
            text,
        };

        let mut inner = self.inner.lock().unwrap();
        inner.messages.push(message.clone());
        Ok(message)
    }
}
