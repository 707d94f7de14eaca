use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::category::Category;
use super::collection::Collection;
use super::settings::Settings;

/// Whole-dataset snapshot written by export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub bookmarks: Vec<Bookmark>,
    pub collections: Vec<Collection>,
    pub categories: Vec<Category>,
    pub settings: Settings,
    pub export_date: DateTime<Utc>,
}

/// Import payload. Any subset of the buckets may be present; unknown keys
/// (including `exportDate`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub bookmarks: Option<Vec<Bookmark>>,
    #[serde(default)]
    pub collections: Option<Vec<Collection>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

/// Which buckets an import overwrote and how many records each received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub bookmarks: Option<usize>,
    pub collections: Option<usize>,
    pub categories: Option<usize>,
    pub settings: bool,
}

/// `bookmarkhub-export-<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("bookmarkhub-export-{}.json", date.format("%Y-%m-%d"))
}
