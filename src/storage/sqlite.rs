//! SQLite-backed key-value store.
//!
//! Each key is one row of `kv_store` holding its JSON value as text.
//! Batches run inside a single transaction.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use super::KeyValueStore;
use crate::database::Database;
use crate::types::errors::StorageError;

pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Opens (or creates) the store file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    fn with_db<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .db
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("store lock poisoned: {}", e)))?;
        f(&mut guard)
    }

    fn encode(value: &Value) -> Result<String, StorageError> {
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let raw: Option<String> = self.with_db(|db| {
            Ok(db
                .connection()
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?)
        })?;

        raw.map(|text| {
            serde_json::from_str(&text).map_err(|e| {
                StorageError::Serialization(format!("corrupt value under {}: {}", key, e))
            })
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let text = Self::encode(&value)?;
        self.with_db(|db| {
            db.connection().execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, text, chrono::Utc::now().timestamp()],
            )?;
            Ok(())
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_db(|db| {
            db.connection()
                .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), StorageError> {
        let encoded = entries
            .iter()
            .map(|(key, value)| Ok((key.as_str(), Self::encode(value)?)))
            .collect::<Result<Vec<_>, StorageError>>()?;

        self.with_db(|db| {
            let now = chrono::Utc::now().timestamp();
            let tx = db.connection_mut().transaction()?;
            for (key, text) in &encoded {
                tx.execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    params![key, text, now],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}
