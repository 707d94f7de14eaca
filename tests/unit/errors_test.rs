use bookmarkhub::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::Unavailable("disk full".to_string()).to_string(),
        "Storage unavailable: disk full"
    );
    assert_eq!(
        StorageError::Serialization("bookmarks: bad".to_string()).to_string(),
        "Storage serialization error: bookmarks: bad"
    );
    assert_eq!(
        StorageError::MalformedImport("eof".to_string()).to_string(),
        "Malformed import: eof"
    );
}

#[test]
fn storage_error_from_rusqlite_is_unavailable() {
    let err: StorageError = rusqlite::Error::InvalidQuery.into();
    assert!(matches!(err, StorageError::Unavailable(_)));
}

// === CatalogError Tests ===

#[test]
fn catalog_error_display_variants() {
    assert_eq!(
        CatalogError::UnknownCollection("work".to_string()).to_string(),
        "Collection not found: work"
    );
    assert_eq!(
        CatalogError::UnknownCategory("cat1".to_string()).to_string(),
        "Category not found: cat1"
    );
    assert_eq!(
        CatalogError::CategoryMismatch {
            category_id: "cat1".to_string(),
            collection_id: "work".to_string(),
        }
        .to_string(),
        "Category cat1 does not belong to collection work"
    );
    assert_eq!(CatalogError::InvalidIndex(7).to_string(), "Invalid index: 7");
    assert_eq!(CatalogError::NoCurrentTab.to_string(), "No current tab captured");
    assert_eq!(
        CatalogError::NotWebPage("about:blank".to_string()).to_string(),
        "Not a web page: about:blank"
    );
    assert_eq!(
        CatalogError::ConsistencyViolation("dup".to_string()).to_string(),
        "Consistency violation: dup"
    );
}

#[test]
fn catalog_error_wraps_storage_error_transparently() {
    let err: CatalogError = StorageError::Unavailable("gone".to_string()).into();
    assert_eq!(err.to_string(), "Storage unavailable: gone");
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::InvalidBackend("redis".to_string()).to_string(),
        "Unknown storage backend: redis"
    );
    assert_eq!(
        ConfigError::Parse("trailing comma".to_string()).to_string(),
        "Failed to parse config file: trailing comma"
    );
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(CatalogError::NoCurrentTab);
    assert!(err.source().is_none());
}
