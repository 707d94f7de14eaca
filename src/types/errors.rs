use thiserror::Error;

// === StorageError ===

/// Errors raised by the key-value store and the storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected or failed the call.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// A stored value could not be converted to or from its typed form.
    #[error("Storage serialization error: {0}")]
    Serialization(String),
    /// An import document failed to parse or had the wrong shape.
    #[error("Malformed import: {0}")]
    MalformedImport(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

// === CatalogError ===

/// Errors raised by catalog mutations. Missing IDs on edit/delete are not
/// errors; those operations report `false` instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Persisting the mutation failed; the working set was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The referenced collection does not exist.
    #[error("Collection not found: {0}")]
    UnknownCollection(String),
    /// The referenced category does not exist.
    #[error("Category not found: {0}")]
    UnknownCategory(String),
    /// The category belongs to a different collection than the bookmark.
    #[error("Category {category_id} does not belong to collection {collection_id}")]
    CategoryMismatch {
        category_id: String,
        collection_id: String,
    },
    /// The URL is empty after trimming.
    #[error("Invalid url: {0:?}")]
    InvalidUrl(String),
    /// A drag source index outside the category's list.
    #[error("Invalid index: {0}")]
    InvalidIndex(usize),
    /// A collection cannot absorb its own bookmarks on delete.
    #[error("Cannot reassign bookmarks of collection {0} to itself")]
    SelfReassignment(String),
    /// Quick save only accepts web pages.
    #[error("Not a web page: {0}")]
    NotWebPage(String),
    /// No current tab was staged before saving it.
    #[error("No current tab captured")]
    NoCurrentTab,
    /// An invariant would be broken by persisting this state.
    #[error("Consistency violation: {0}")]
    ConsistencyViolation(String),
}

// === ConfigError ===

/// Errors related to loading the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Unknown storage backend: {0}")]
    InvalidBackend(String),
}
