// BookmarkHub Settings Service
// Keeps the user's theme and view preferences, persisted in the `settings` bucket.

use async_trait::async_trait;
use tracing::debug;

use crate::storage::StorageAdapter;
use crate::types::errors::StorageError;
use crate::types::settings::Settings;

/// Trait defining the settings service interface.
#[async_trait]
pub trait SettingsServiceTrait {
    async fn load(&mut self) -> Result<Settings, StorageError>;
    fn get_settings(&self) -> &Settings;
    async fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;
    async fn reset(&mut self) -> Result<(), StorageError>;
}

pub struct SettingsService {
    storage: StorageAdapter,
    settings: Settings,
}

impl SettingsService {
    pub fn new(storage: StorageAdapter) -> Self {
        Self {
            storage,
            settings: Settings::default(),
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    /// Reads the stored settings, falling back to defaults when none are stored.
    async fn load(&mut self) -> Result<Settings, StorageError> {
        self.settings = self.storage.get_settings().await?;
        Ok(self.settings.clone())
    }

    fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Sets one field by its wire name (`theme`, `viewType`) and saves.
    ///
    /// The new value is validated by deserializing the whole settings object,
    /// so `{"theme": "sepia"}` is rejected and nothing is written.
    async fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        let mut json = serde_json::to_value(&self.settings)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        match json.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(StorageError::Serialization(format!(
                    "Key '{}' not found in settings",
                    key
                )))
            }
        }

        let updated: Settings = serde_json::from_value(json).map_err(|e| {
            StorageError::Serialization(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.storage.save_settings(&updated).await?;
        self.settings = updated;
        debug!(%key, "setting updated");
        Ok(())
    }

    /// Restores `{theme: system, viewType: grid}` and saves.
    async fn reset(&mut self) -> Result<(), StorageError> {
        let defaults = Settings::default();
        self.storage.save_settings(&defaults).await?;
        self.settings = defaults;
        Ok(())
    }
}
