use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::collection::DEFAULT_COLLECTION_ID;
use super::errors::CatalogError;

fn default_collection_id() -> String {
    DEFAULT_COLLECTION_ID.to_string()
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Represents a saved page.
///
/// Older popup builds stored the icon as `favicon` or `favIconUrl` and omitted
/// tags, flags and counters; those records still load through the aliases and
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, alias = "favicon", alias = "favIconUrl")]
    pub favicon_url: Option<String>,
    #[serde(default = "default_collection_id")]
    pub collection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub tabbed: bool,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visit_count: u64,
}

impl Bookmark {
    /// Case-insensitive substring match on title and URL. `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

/// Payload for creating a bookmark. Missing `collection_id` means the default collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBookmark {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, alias = "favicon", alias = "favIconUrl")]
    pub favicon_url: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub tabbed: bool,
    #[serde(default)]
    pub favorite: bool,
}

impl NewBookmark {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn in_collection(mut self, collection_id: &str) -> Self {
        self.collection_id = Some(collection_id.to_string());
        self
    }

    pub fn in_category(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }
}

/// Partial update for a bookmark. Only fields that are `Some` are applied;
/// nullable fields use a nested `Option` so `null` clears them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookmarkUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub favicon_url: Option<Option<String>>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
    #[serde(default)]
    pub highlight: Option<bool>,
    #[serde(default)]
    pub tabbed: Option<bool>,
    #[serde(default)]
    pub favorite: Option<bool>,
}

impl BookmarkUpdate {
    /// Merges the update over `bookmark`. URL and tags are normalized first,
    /// so a rejected URL leaves the record untouched.
    pub fn apply_to(&self, bookmark: &mut Bookmark) -> Result<(), CatalogError> {
        let url = self.url.as_deref().map(normalize_url).transpose()?;

        if let Some(title) = &self.title {
            bookmark.title = title.clone();
        }
        if let Some(url) = url {
            bookmark.url = url;
        }
        if let Some(favicon_url) = &self.favicon_url {
            bookmark.favicon_url = favicon_url.clone();
        }
        if let Some(collection_id) = &self.collection_id {
            bookmark.collection_id = collection_id.clone();
        }
        if let Some(category_id) = &self.category_id {
            bookmark.category_id = category_id.clone();
        }
        if let Some(tags) = &self.tags {
            bookmark.tags = normalize_tags(tags);
        }
        if let Some(note) = &self.note {
            bookmark.note = note.clone();
        }
        if let Some(highlight) = self.highlight {
            bookmark.highlight = highlight;
        }
        if let Some(tabbed) = self.tabbed {
            bookmark.tabbed = tabbed;
        }
        if let Some(favorite) = self.favorite {
            bookmark.favorite = favorite;
        }
        Ok(())
    }
}

/// Active page handed over by the browser integration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCapture {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, alias = "favIconUrl")]
    pub favicon_url: Option<String>,
}

/// Adds `https://` when the input carries no `scheme://` prefix.
pub fn normalize_url(raw: &str) -> Result<String, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidUrl(raw.to_string()));
    }

    let has_scheme = trimmed
        .split_once("://")
        .map(|(scheme, _)| {
            !scheme.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
        .unwrap_or(false);

    if has_scheme {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{}", trimmed))
    }
}

/// Trims every tag and drops the empty ones, keeping insertion order.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
