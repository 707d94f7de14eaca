//! Typed buckets over a [`KeyValueStore`].
//!
//! The adapter holds no business rules: it reads and writes whole buckets,
//! fills in defaults for missing keys, and moves the full dataset in and out
//! as JSON.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{
    KeyValueStore, BOOKMARKS_KEY, CATEGORIES_KEY, COLLECTIONS_KEY, PENDING_CAPTURE_KEY,
    SETTINGS_KEY,
};
use crate::types::bookmark::{Bookmark, TabCapture};
use crate::types::category::Category;
use crate::types::collection::{seed_collections, Collection};
use crate::types::errors::StorageError;
use crate::types::export::{ExportDocument, ImportDocument, ImportSummary};
use crate::types::settings::Settings;

#[derive(Clone)]
pub struct StorageAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl StorageAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StorageError::Serialization(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(String, Value), StorageError> {
        let json = serde_json::to_value(value)
            .map_err(|e| StorageError::Serialization(format!("{}: {}", key, e)))?;
        Ok((key.to_string(), json))
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let (key, json) = Self::encode(key, value)?;
        self.store.set(&key, json).await
    }

    pub async fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        Ok(self.read(BOOKMARKS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
        self.write(BOOKMARKS_KEY, bookmarks).await
    }

    /// Returns the seed collections when nothing has been stored yet.
    pub async fn get_collections(&self) -> Result<Vec<Collection>, StorageError> {
        Ok(self
            .read(COLLECTIONS_KEY)
            .await?
            .unwrap_or_else(seed_collections))
    }

    pub async fn save_collections(&self, collections: &[Collection]) -> Result<(), StorageError> {
        self.write(COLLECTIONS_KEY, collections).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.read(CATEGORIES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_categories(&self, categories: &[Category]) -> Result<(), StorageError> {
        self.write(CATEGORIES_KEY, categories).await
    }

    /// Returns `{theme: system, viewType: grid}` when nothing has been stored yet.
    pub async fn get_settings(&self) -> Result<Settings, StorageError> {
        Ok(self.read(SETTINGS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.write(SETTINGS_KEY, settings).await
    }

    /// Persists the buckets that changed together in one batch. Bookmarks go
    /// first so a store without transactions never holds a collection removal
    /// without the matching bookmark rewrite.
    pub async fn save_catalog(
        &self,
        bookmarks: Option<&[Bookmark]>,
        collections: Option<&[Collection]>,
        categories: Option<&[Category]>,
    ) -> Result<(), StorageError> {
        let mut entries = Vec::with_capacity(3);
        if let Some(bookmarks) = bookmarks {
            entries.push(Self::encode(BOOKMARKS_KEY, bookmarks)?);
        }
        if let Some(categories) = categories {
            entries.push(Self::encode(CATEGORIES_KEY, categories)?);
        }
        if let Some(collections) = collections {
            entries.push(Self::encode(COLLECTIONS_KEY, collections)?);
        }
        if entries.is_empty() {
            return Ok(());
        }
        self.store.set_many(entries).await
    }

    /// Serializes the whole dataset as a pretty-printed JSON document.
    pub async fn export_data(&self) -> Result<String, StorageError> {
        let document = ExportDocument {
            bookmarks: self.get_bookmarks().await?,
            collections: self.get_collections().await?,
            categories: self.get_categories().await?,
            settings: self.get_settings().await?,
            export_date: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        info!(
            bookmarks = document.bookmarks.len(),
            collections = document.collections.len(),
            "exported dataset"
        );
        Ok(json)
    }

    /// Overwrites every bucket present in `document`, leaving the others alone.
    ///
    /// All present buckets are parsed before anything is written, and the
    /// writes go out as one batch.
    pub async fn try_import_data(&self, document: &str) -> Result<ImportSummary, StorageError> {
        let parsed: ImportDocument = serde_json::from_str(document)
            .map_err(|e| StorageError::MalformedImport(e.to_string()))?;

        let mut summary = ImportSummary::default();
        let mut entries = Vec::with_capacity(4);

        if let Some(bookmarks) = &parsed.bookmarks {
            summary.bookmarks = Some(bookmarks.len());
            entries.push(Self::encode(BOOKMARKS_KEY, bookmarks)?);
        }
        if let Some(categories) = &parsed.categories {
            summary.categories = Some(categories.len());
            entries.push(Self::encode(CATEGORIES_KEY, categories)?);
        }
        if let Some(collections) = &parsed.collections {
            summary.collections = Some(collections.len());
            entries.push(Self::encode(COLLECTIONS_KEY, collections)?);
        }
        if let Some(settings) = &parsed.settings {
            summary.settings = true;
            entries.push(Self::encode(SETTINGS_KEY, settings)?);
        }

        if !entries.is_empty() {
            self.store.set_many(entries).await?;
        }
        info!(?summary, "imported dataset");
        Ok(summary)
    }

    /// Boolean form of [`try_import_data`](Self::try_import_data): any failure
    /// is logged and reported as `false`.
    pub async fn import_data(&self, document: &str) -> bool {
        match self.try_import_data(document).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "import rejected");
                false
            }
        }
    }

    /// Parks a page captured outside the popup until the popup claims it.
    pub async fn stage_pending_capture(&self, capture: &TabCapture) -> Result<(), StorageError> {
        self.write(PENDING_CAPTURE_KEY, capture).await
    }

    /// Returns the parked capture, if any, and clears it.
    pub async fn take_pending_capture(&self) -> Result<Option<TabCapture>, StorageError> {
        let capture = self.read(PENDING_CAPTURE_KEY).await?;
        if capture.is_some() {
            self.store.remove(PENDING_CAPTURE_KEY).await?;
        }
        Ok(capture)
    }
}
