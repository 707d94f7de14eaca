//! Persistence boundary for BookmarkHub.
//!
//! [`KeyValueStore`] is the raw asynchronous key-value contract; the
//! [`StorageAdapter`] layers typed buckets, defaults and import/export on top.

pub mod adapter;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::errors::StorageError;

pub use adapter::StorageAdapter;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const COLLECTIONS_KEY: &str = "collections";
pub const CATEGORIES_KEY: &str = "categories";
pub const SETTINGS_KEY: &str = "settings";
/// Page captured from the context menu, waiting for the popup to pick it up.
pub const PENDING_CAPTURE_KEY: &str = "tempBookmark";

/// Asynchronous key-value store holding whole JSON values per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Writes several keys as one batch.
    ///
    /// The default writes entries one by one in the given order, so callers
    /// put the entry that must become durable first at the front. Back-ends
    /// with transactions override this to make the batch all-or-nothing.
    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(&key, value).await?;
        }
        Ok(())
    }
}
