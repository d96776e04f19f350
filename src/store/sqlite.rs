use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{matches_filter, HubStore, Message, NewMessage, StoreError, StoreResult};

/// Production store: hubs live as JSON text in a `data` column, messages in
/// their own table. Referential integrity between the two is not enforced.
pub struct SqliteHubs {
    db_pool: SqlitePool,
}

impl SqliteHubs {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Creates the tables if they don't exist yet.
    pub async fn init(&self) -> StoreResult<()> {
        sqlx::query("CREATE TABLE IF NOT EXISTS hubs (id TEXT PRIMARY KEY, data TEXT NOT NULL)")
            .execute(&self.db_pool)
            .await?;
        sqlx::query("CREATE TABLE IF NOT EXISTS messages (id TEXT PRIMARY KEY, hub_id TEXT NOT NULL, sender TEXT NOT NULL, text TEXT NOT NULL)")
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HubStore for SqliteHubs {
    async fn find(&self, filter: &HashMap<String, String>) -> StoreResult<Vec<Value>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT data FROM hubs")
            .fetch_all(&self.db_pool)
            .await?;

        let mut hubs = Vec::new();
        for (data,) in rows {
            let hub: Value = serde_json::from_str(&data)?;
            if matches_filter(&hub, filter) {
                hubs.push(hub);
            }
        }
        Ok(hubs)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Value>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM hubs WHERE id=?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn add(&self, hub: Value) -> StoreResult<Value> {
        let Value::Object(mut obj) = hub else {
            return Err(StoreError(anyhow!("hub must be a JSON object")));
        };

        let id = Uuid::now_v7().to_string();
        obj.insert("id".to_owned(), Value::String(id.clone()));
        let hub = Value::Object(obj);

        sqlx::query("INSERT INTO hubs (id,data) values (?,?)")
            .bind(&id)
            .bind(hub.to_string())
            .execute(&self.db_pool)
            .await?;

        Ok(hub)
    }

    async fn update(&self, id: &str, patch: Value) -> StoreResult<Option<Value>> {
        let Value::Object(patch) = patch else {
            return Err(StoreError(anyhow!("hub patch must be a JSON object")));
        };

        let Some(hub) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let Value::Object(mut obj) = hub else {
            return Err(StoreError(anyhow!("stored hub {id} is not an object")));
        };
        for (key, value) in patch {
            obj.insert(key, value);
        }
        // the id column is the source of truth, a patched-in id is ignored
        obj.insert("id".to_owned(), Value::String(id.to_owned()));
        let hub = Value::Object(obj);

        // the hub may vanish between the read and this write; trust the
        // write, not the read
        let result = sqlx::query("UPDATE hubs SET data=? WHERE id=?")
            .bind(hub.to_string())
            .bind(id)
            .execute(&self.db_pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(hub))
    }

    async fn remove(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM hubs WHERE id=?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_hub_messages(&self, hub_id: &str) -> StoreResult<Vec<Message>> {
        let rows: Vec<(String, String, String, String)> =
            sqlx::query_as("SELECT id,hub_id,sender,text FROM messages WHERE hub_id=?")
                .bind(hub_id)
                .fetch_all(&self.db_pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, hub_id, sender, text)| Message { id, hub_id, sender, text })
            .collect())
    }

    async fn add_message(&self, message: NewMessage) -> StoreResult<Message> {
        let id = Uuid::now_v7().to_string();

        // missing sender/text hits the NOT NULL constraints
        sqlx::query("INSERT INTO messages (id,hub_id,sender,text) values (?,?,?,?)")
            .bind(&id)
            .bind(&message.hub_id)
            .bind(&message.sender)
            .bind(&message.text)
            .execute(&self.db_pool)
            .await?;

        Ok(Message {
            id,
            hub_id: message.hub_id,
            sender: message.sender.unwrap_or_default(),
            text: message.text.unwrap_or_default(),
        })
    }
}
