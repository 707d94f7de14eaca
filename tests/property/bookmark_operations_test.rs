//! Property-based tests for catalog bookmark operations.
//!
//! Adding bookmarks always yields unique IDs and grows the catalog by one,
//! and search finds a bookmark regardless of the query's letter case.

use std::collections::HashSet;
use std::sync::Arc;

use bookmarkhub::managers::catalog_manager::{CatalogManager, CatalogManagerTrait};
use bookmarkhub::storage::{MemoryStore, StorageAdapter};
use bookmarkhub::types::bookmark::NewBookmark;
use proptest::prelude::*;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
}

async fn fresh_manager() -> CatalogManager {
    let mut mgr = CatalogManager::new(StorageAdapter::new(Arc::new(MemoryStore::new())));
    mgr.initialize().await.expect("initialize should succeed");
    mgr
}

/// URLs with or without a scheme; the scheme-less ones get `https://` on save.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("https://"), Just("http://")],
        "[a-z][a-z0-9]{2,15}",
        prop_oneof![Just(".com"), Just(".org"), Just(".net"), Just(".io")],
        proptest::option::of("/[a-z0-9]{1,10}"),
    )
        .prop_map(|(scheme, host, tld, path)| {
            format!("{}{}{}{}", scheme, host, tld, path.unwrap_or_default())
        })
}

fn arb_title() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{1,30}"
}

fn arb_collection() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("default"), Just("work"), Just("personal")]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn add_assigns_unique_ids_and_grows_by_one(
        entries in prop::collection::vec((arb_title(), arb_url(), arb_collection()), 1..20),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let mut mgr = fresh_manager().await;
            let mut ids = HashSet::new();

            for (title, url, collection) in &entries {
                let before = mgr.get_all_bookmarks().len();
                let id = mgr
                    .add_bookmark(NewBookmark::new(title, url).in_collection(collection))
                    .await
                    .expect("add_bookmark should succeed for valid inputs");
                prop_assert_eq!(mgr.get_all_bookmarks().len(), before + 1);
                prop_assert!(ids.insert(id), "IDs must never repeat");
            }

            for bookmark in mgr.get_all_bookmarks() {
                prop_assert!(bookmark.url.contains("://"), "stored URL {} lacks a scheme", bookmark.url);
                prop_assert!(mgr.get_collection_by_id(&bookmark.collection_id).is_some());
            }
            prop_assert!(mgr.check_consistency().is_empty());
            Ok(())
        })?;
    }

    #[test]
    fn search_is_case_insensitive(
        title in arb_title(),
        url in arb_url(),
        upper in any::<bool>(),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let mut mgr = fresh_manager().await;
            let id = mgr.add_bookmark(NewBookmark::new(&title, &url)).await.unwrap();

            let query = if upper { title.to_uppercase() } else { title.to_lowercase() };
            let results = mgr.search_bookmarks(&query);
            if query.trim().is_empty() {
                prop_assert_eq!(results.len(), 1);
            } else {
                prop_assert!(
                    results.iter().any(|b| b.id == id),
                    "query {:?} should find bookmark titled {:?}",
                    query,
                    title
                );
            }
            Ok(())
        })?;
    }

    #[test]
    fn delete_removes_exactly_one(
        titles in prop::collection::vec(arb_title(), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let mut mgr = fresh_manager().await;
            let mut ids = Vec::new();
            for (i, title) in titles.iter().enumerate() {
                let url = format!("site{}.example", i);
                ids.push(mgr.add_bookmark(NewBookmark::new(title, &url)).await.unwrap());
            }

            let victim = pick.get(&ids).clone();
            prop_assert!(mgr.delete_bookmark(&victim).await.unwrap());
            prop_assert_eq!(mgr.get_all_bookmarks().len(), ids.len() - 1);
            prop_assert!(mgr.get_bookmark(&victim).is_none());
            Ok(())
        })?;
    }
}
