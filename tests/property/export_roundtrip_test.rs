//! Property-based tests for export/import.
//!
//! Exporting a catalog and importing the document into an empty store must
//! reproduce every bucket exactly.

use std::sync::Arc;

use bookmarkhub::managers::catalog_manager::{CatalogManager, CatalogManagerTrait};
use bookmarkhub::storage::{MemoryStore, StorageAdapter};
use bookmarkhub::types::bookmark::NewBookmark;
use bookmarkhub::types::collection::NewCollection;
use bookmarkhub::types::settings::{Settings, ThemeMode, ViewType};
use proptest::prelude::*;

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark), Just(ThemeMode::System)],
        prop_oneof![Just(ViewType::Grid), Just(ViewType::List)],
    )
        .prop_map(|(theme, view_type)| Settings { theme, view_type })
}

#[derive(Debug, Clone)]
struct Entry {
    title: String,
    host: String,
    note: Option<String>,
    tags: Vec<String>,
    favorite: bool,
    collection: usize,
    categorized: bool,
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        "[a-zA-Z0-9 äöü]{0,20}",
        "[a-z]{3,10}",
        proptest::option::of("[a-z ]{1,30}"),
        prop::collection::vec("[a-z]{1,8}", 0..4),
        any::<bool>(),
        0usize..4,
        any::<bool>(),
    )
        .prop_map(|(title, host, note, tags, favorite, collection, categorized)| Entry {
            title,
            host,
            note,
            tags,
            favorite,
            collection,
            categorized,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(25))]

    #[test]
    fn export_then_import_reproduces_catalog(
        entries in prop::collection::vec(arb_entry(), 0..15),
        settings in arb_settings(),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build tokio runtime");

        rt.block_on(async {
            let source = StorageAdapter::new(Arc::new(MemoryStore::new()));
            let mut mgr = CatalogManager::new(source.clone());
            mgr.initialize().await.unwrap();
            source.save_settings(&settings).await.unwrap();

            let extra = mgr.add_collection(NewCollection::new("Extra").with_color("#34C759")).await.unwrap();
            let collection_ids = ["default".to_string(), "work".to_string(), "personal".to_string(), extra];
            let mut category_ids = Vec::new();
            for collection_id in &collection_ids {
                category_ids.push(mgr.add_category(collection_id, "Inbox").await.unwrap());
            }

            for (i, entry) in entries.iter().enumerate() {
                let mut data = NewBookmark::new(&entry.title, &format!("{}{}.example", entry.host, i))
                    .in_collection(&collection_ids[entry.collection]);
                if entry.categorized {
                    data = data.in_category(&category_ids[entry.collection]);
                }
                data.note = entry.note.clone();
                data.tags = entry.tags.clone();
                data.favorite = entry.favorite;
                let id = mgr.add_bookmark(data).await.unwrap();
                if i % 3 == 0 {
                    mgr.record_visit(&id).await.unwrap();
                }
            }

            let document = mgr.export_data().await.unwrap();

            let target = StorageAdapter::new(Arc::new(MemoryStore::new()));
            prop_assert!(target.import_data(&document).await);

            prop_assert_eq!(target.get_bookmarks().await.unwrap(), source.get_bookmarks().await.unwrap());
            prop_assert_eq!(target.get_collections().await.unwrap(), source.get_collections().await.unwrap());
            prop_assert_eq!(target.get_categories().await.unwrap(), source.get_categories().await.unwrap());
            prop_assert_eq!(target.get_settings().await.unwrap(), settings);
            Ok(())
        })?;
    }

    #[test]
    fn import_of_exported_empty_catalog_is_seeded_state(settings in arb_settings()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build tokio runtime");

        rt.block_on(async {
            let source = StorageAdapter::new(Arc::new(MemoryStore::new()));
            source.save_settings(&settings).await.unwrap();
            let document = source.export_data().await.unwrap();

            let target = StorageAdapter::new(Arc::new(MemoryStore::new()));
            prop_assert!(target.import_data(&document).await);
            prop_assert!(target.get_bookmarks().await.unwrap().is_empty());
            let ids: Vec<String> = target.get_collections().await.unwrap().into_iter().map(|c| c.id).collect();
            prop_assert_eq!(ids, vec!["default", "work", "personal"]);
            prop_assert_eq!(target.get_settings().await.unwrap(), settings);
            Ok(())
        })?;
    }
}
