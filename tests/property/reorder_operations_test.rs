//! Property-based tests for category reordering and bookmark drag moves.

use std::sync::Arc;

use bookmarkhub::managers::catalog_manager::{CatalogManager, CatalogManagerTrait};
use bookmarkhub::storage::{MemoryStore, StorageAdapter};
use bookmarkhub::types::bookmark::NewBookmark;
use bookmarkhub::types::category::DragLocation;
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
        .block_on(future)
}

async fn manager_with_categories(count: usize) -> (CatalogManager, Vec<String>) {
    let mut mgr = CatalogManager::new(StorageAdapter::new(Arc::new(MemoryStore::new())));
    mgr.initialize().await.unwrap();
    let mut ids = Vec::new();
    for i in 0..count {
        ids.push(mgr.add_category("work", &format!("cat{}", i)).await.unwrap());
    }
    // A second collection whose ranks must never move.
    mgr.add_category("personal", "p0").await.unwrap();
    mgr.add_category("personal", "p1").await.unwrap();
    (mgr, ids)
}

fn ranked_ids(mgr: &CatalogManager, collection_id: &str) -> Vec<String> {
    mgr.get_categories_by_collection(collection_id)
        .into_iter()
        .map(|c| c.id.clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn reorder_same_index_is_identity(count in 1usize..8, pick in any::<prop::sample::Index>()) {
        block_on(async {
            let (mut mgr, _) = manager_with_categories(count).await;
            let before = mgr.get_all_categories().to_vec();
            let index = pick.index(count);

            mgr.reorder_categories("work", index, index).await.unwrap();
            prop_assert_eq!(mgr.get_all_categories(), before.as_slice());
            Ok(())
        })?;
    }

    #[test]
    fn reorder_is_a_permutation_with_dense_ranks(
        count in 1usize..8,
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        block_on(async {
            let (mut mgr, ids) = manager_with_categories(count).await;
            let personal_before = ranked_ids(&mgr, "personal");
            let (from, to) = (from.index(count), to.index(count));

            mgr.reorder_categories("work", from, to).await.unwrap();

            let mut expected = ids.clone();
            let moved = expected.remove(from);
            expected.insert(to, moved);
            prop_assert_eq!(ranked_ids(&mgr, "work"), expected);

            let ranks: Vec<u32> = mgr.get_categories_by_collection("work").iter().map(|c| c.order).collect();
            prop_assert_eq!(ranks, (0..count as u32).collect::<Vec<_>>());
            prop_assert_eq!(ranked_ids(&mgr, "personal"), personal_before);
            Ok(())
        })?;
    }

    #[test]
    fn cross_category_move_changes_exactly_one_bookmark(
        sizes in (1usize..6, 0usize..6),
        from in any::<prop::sample::Index>(),
        to in 0usize..8,
    ) {
        block_on(async {
            let (mut mgr, cats) = manager_with_categories(2).await;
            let (source_len, target_len) = sizes;
            for i in 0..source_len {
                let data = NewBookmark::new(&format!("s{}", i), &format!("s{}.io", i))
                    .in_collection("work")
                    .in_category(&cats[0]);
                mgr.add_bookmark(data).await.unwrap();
            }
            for i in 0..target_len {
                let data = NewBookmark::new(&format!("t{}", i), &format!("t{}.io", i))
                    .in_collection("work")
                    .in_category(&cats[1]);
                mgr.add_bookmark(data).await.unwrap();
            }
            mgr.add_bookmark(NewBookmark::new("loose", "loose.io").in_collection("work")).await.unwrap();
            let before = mgr.get_all_bookmarks().to_vec();

            let from_index = from.index(source_len);
            mgr.move_bookmark("work", DragLocation::new(&cats[0], from_index), DragLocation::new(&cats[1], to))
                .await
                .unwrap();

            let after = mgr.get_all_bookmarks();
            prop_assert_eq!(after.len(), before.len());

            let changed: Vec<&str> = after
                .iter()
                .filter(|b| {
                    let old = before.iter().find(|o| o.id == b.id).expect("no bookmark may vanish");
                    old.category_id != b.category_id
                })
                .map(|b| b.title.as_str())
                .collect();
            let expected_title = format!("s{}", from_index);
            prop_assert_eq!(changed, vec![expected_title.as_str()]);

            let target_titles: Vec<&str> = after
                .iter()
                .filter(|b| b.category_id.as_deref() == Some(cats[1].as_str()))
                .map(|b| b.title.as_str())
                .collect();
            prop_assert_eq!(target_titles.len(), target_len + 1);
            prop_assert_eq!(target_titles[to.min(target_len)], expected_title.as_str());
            prop_assert!(mgr.check_consistency().is_empty());
            Ok(())
        })?;
    }
}
