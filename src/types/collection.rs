use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved collection that always exists and cannot be deleted.
pub const DEFAULT_COLLECTION_ID: &str = "default";

/// Filter sentinel meaning "every collection".
pub const ALL_COLLECTIONS: &str = "all";

pub const DEFAULT_COLLECTION_COLOR: &str = "#007AFF";

/// A named, colored grouping of bookmarks.
///
/// Seed collections carry no timestamps, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_color() -> String {
    DEFAULT_COLLECTION_COLOR.to_string()
}

impl Collection {
    fn seed(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Collections a fresh install starts with.
pub fn seed_collections() -> Vec<Collection> {
    vec![
        Collection::seed(DEFAULT_COLLECTION_ID, "Default", DEFAULT_COLLECTION_COLOR),
        Collection::seed("work", "Work", "#5856D6"),
        Collection::seed("personal", "Personal", "#FF2D55"),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCollection {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewCollection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollectionUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CollectionUpdate {
    pub fn apply_to(&self, collection: &mut Collection) {
        if let Some(name) = &self.name {
            collection.name = name.clone();
        }
        if let Some(color) = &self.color {
            collection.color = color.clone();
        }
    }
}
