//! App Core for BookmarkHub.
//!
//! Central struct wiring the store, the catalog manager and the settings
//! service together, created once and handed to the request loop.

use std::fs;
use std::sync::Arc;

use tracing::info;

use crate::managers::catalog_manager::{CatalogManager, CatalogManagerTrait};
use crate::services::config::{AppConfig, StoreBackend};
use crate::services::settings_service::{SettingsService, SettingsServiceTrait};
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, StorageAdapter};

/// Central application struct holding the catalog and settings.
pub struct App {
    pub config: AppConfig,
    pub storage: StorageAdapter,
    pub catalog: CatalogManager,
    pub settings: SettingsService,
}

impl App {
    /// Opens the configured store and loads catalog and settings from it.
    pub async fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let store: Arc<dyn KeyValueStore> = match config.backend {
            StoreBackend::Sqlite => {
                fs::create_dir_all(&config.data_dir)?;
                Arc::new(SqliteStore::open(config.database_path())?)
            }
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        info!(backend = ?config.backend, data_dir = %config.data_dir.display(), "opening store");
        Self::with_store(config, store).await
    }

    /// Builds the app over an already constructed store.
    pub async fn with_store(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let storage = StorageAdapter::new(store);
        let mut catalog = CatalogManager::new(storage.clone());
        catalog.initialize().await?;
        let mut settings = SettingsService::new(storage.clone());
        settings.load().await?;

        Ok(Self {
            config,
            storage,
            catalog,
            settings,
        })
    }

    /// Volatile app for tests.
    pub async fn in_memory() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config = AppConfig {
            backend: StoreBackend::Memory,
            ..AppConfig::default()
        };
        Self::with_store(config, Arc::new(MemoryStore::new())).await
    }

    /// Imports a document and reloads both the catalog and the settings.
    pub async fn import_data(&mut self, document: &str) -> bool {
        if !self.catalog.import_data(document).await {
            return false;
        }
        self.settings.load().await.is_ok()
    }
}
