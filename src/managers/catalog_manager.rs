//! Catalog Manager for BookmarkHub.
//!
//! Owns the in-memory working set of bookmarks, collections and categories,
//! enforces the referential rules between them, and writes every mutation
//! back through the [`StorageAdapter`].
//!
//! Each mutation snapshots the working set first. If the new state would add
//! an invariant violation, or the store rejects the write, the snapshot is
//! restored and the error is returned, so memory and storage never diverge.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::reorder::{insertion_point, splice_move, subsequence_slots};
use crate::storage::StorageAdapter;
use crate::types::bookmark::{normalize_tags, normalize_url, Bookmark, BookmarkUpdate, NewBookmark, TabCapture};
use crate::types::category::{Category, DragLocation};
use crate::types::collection::{
    seed_collections, Collection, CollectionUpdate, NewCollection, ALL_COLLECTIONS,
    DEFAULT_COLLECTION_COLOR, DEFAULT_COLLECTION_ID,
};
use crate::types::errors::CatalogError;

/// Outcome of saving a page from the toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickSave {
    Saved(String),
    AlreadySaved(String),
}

/// Trait defining catalog operations exposed to the presentation layer.
#[async_trait]
pub trait CatalogManagerTrait {
    async fn initialize(&mut self) -> Result<(), CatalogError>;

    // Bookmarks
    async fn add_bookmark(&mut self, data: NewBookmark) -> Result<String, CatalogError>;
    async fn edit_bookmark(&mut self, id: &str, updates: BookmarkUpdate) -> Result<bool, CatalogError>;
    async fn delete_bookmark(&mut self, id: &str) -> Result<bool, CatalogError>;
    async fn record_visit(&mut self, id: &str) -> Result<bool, CatalogError>;
    async fn quick_save(&mut self, capture: TabCapture) -> Result<QuickSave, CatalogError>;
    async fn add_bookmark_from_current_tab(&mut self, data: NewBookmark) -> Result<String, CatalogError>;
    async fn move_bookmark(&mut self, scope: &str, from: DragLocation, to: DragLocation) -> Result<(), CatalogError>;

    // Collections
    async fn add_collection(&mut self, data: NewCollection) -> Result<String, CatalogError>;
    async fn edit_collection(&mut self, id: &str, updates: CollectionUpdate) -> Result<bool, CatalogError>;
    async fn delete_collection(&mut self, id: &str, reassign_to: &str) -> Result<bool, CatalogError>;

    // Categories
    async fn add_category(&mut self, collection_id: &str, name: &str) -> Result<String, CatalogError>;
    async fn rename_category(&mut self, id: &str, name: &str) -> Result<bool, CatalogError>;
    async fn delete_category(&mut self, id: &str) -> Result<bool, CatalogError>;
    async fn reorder_categories(&mut self, collection_id: &str, from: usize, to: usize) -> Result<(), CatalogError>;

    // Dataset
    async fn export_data(&self) -> Result<String, CatalogError>;
    async fn import_data(&mut self, document: &str) -> bool;

    // Queries over the working set
    fn get_all_bookmarks(&self) -> &[Bookmark];
    fn get_bookmark(&self, id: &str) -> Option<&Bookmark>;
    fn get_bookmarks_by_collection(&self, collection_id: &str) -> Vec<&Bookmark>;
    fn search_bookmarks(&self, query: &str) -> Vec<&Bookmark>;
    fn visible_bookmarks(&self, query: &str) -> Vec<&Bookmark>;
    fn bookmark_count(&self, collection_id: &str) -> usize;
    fn get_all_collections(&self) -> &[Collection];
    fn get_collection_by_id(&self, id: &str) -> Option<&Collection>;
    fn get_all_categories(&self) -> &[Category];
    fn get_categories_by_collection(&self, collection_id: &str) -> Vec<&Category>;
    fn check_consistency(&self) -> Vec<String>;

    // Popup state
    fn set_active_collection(&mut self, collection_id: &str);
    fn active_collection(&self) -> &str;
    fn set_current_tab(&mut self, capture: Option<TabCapture>);
    fn current_tab(&self) -> Option<&TabCapture>;
}

/// Buckets touched by a mutation.
#[derive(Debug, Clone, Copy, Default)]
struct Dirty {
    bookmarks: bool,
    collections: bool,
    categories: bool,
}

impl Dirty {
    const BOOKMARKS: Dirty = Dirty { bookmarks: true, collections: false, categories: false };
    const COLLECTIONS: Dirty = Dirty { bookmarks: false, collections: true, categories: false };
    const CATEGORIES: Dirty = Dirty { bookmarks: false, collections: false, categories: true };

    fn and(self, other: Dirty) -> Dirty {
        Dirty {
            bookmarks: self.bookmarks || other.bookmarks,
            collections: self.collections || other.collections,
            categories: self.categories || other.categories,
        }
    }
}

#[derive(Debug, Clone)]
struct WorkingSet {
    bookmarks: Vec<Bookmark>,
    collections: Vec<Collection>,
    categories: Vec<Category>,
}

/// In-memory catalog backed by a storage adapter.
pub struct CatalogManager {
    storage: StorageAdapter,
    bookmarks: Vec<Bookmark>,
    collections: Vec<Collection>,
    categories: Vec<Category>,
    active_collection_id: String,
    current_tab: Option<TabCapture>,
}

impl CatalogManager {
    /// Creates an empty manager. Call [`initialize`](CatalogManagerTrait::initialize)
    /// to load the stored catalog.
    pub fn new(storage: StorageAdapter) -> Self {
        Self {
            storage,
            bookmarks: Vec::new(),
            collections: Vec::new(),
            categories: Vec::new(),
            active_collection_id: ALL_COLLECTIONS.to_string(),
            current_tab: None,
        }
    }

    fn snapshot(&self) -> WorkingSet {
        WorkingSet {
            bookmarks: self.bookmarks.clone(),
            collections: self.collections.clone(),
            categories: self.categories.clone(),
        }
    }

    fn restore(&mut self, snapshot: WorkingSet) {
        self.bookmarks = snapshot.bookmarks;
        self.collections = snapshot.collections;
        self.categories = snapshot.categories;
    }

    /// Validates the mutated working set and persists the dirty buckets,
    /// rolling back to `before` on any failure.
    async fn commit(&mut self, before: WorkingSet, dirty: Dirty) -> Result<(), CatalogError> {
        let existing: HashSet<String> =
            find_violations(&before.bookmarks, &before.collections, &before.categories)
                .into_iter()
                .collect();
        let introduced: Vec<String> = self
            .check_consistency()
            .into_iter()
            .filter(|v| !existing.contains(v))
            .collect();
        if !introduced.is_empty() {
            self.restore(before);
            return Err(CatalogError::ConsistencyViolation(introduced.join("; ")));
        }

        let result = self
            .storage
            .save_catalog(
                dirty.bookmarks.then_some(self.bookmarks.as_slice()),
                dirty.collections.then_some(self.collections.as_slice()),
                dirty.categories.then_some(self.categories.as_slice()),
            )
            .await;

        if let Err(e) = result {
            warn!(error = %e, "persist failed, rolling back working set");
            self.restore(before);
            return Err(e.into());
        }
        Ok(())
    }

    /// New v4 UUID. A clash with an existing ID is reported, never retried.
    fn generate_id(taken: impl Fn(&str) -> bool) -> Result<String, CatalogError> {
        let id = Uuid::new_v4().to_string();
        if taken(&id) {
            return Err(CatalogError::ConsistencyViolation(format!("generated id {} already in use", id)));
        }
        Ok(id)
    }

    fn collection_exists(&self, id: &str) -> bool {
        id == DEFAULT_COLLECTION_ID || self.collections.iter().any(|c| c.id == id)
    }

    fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Checks the collection and category references a bookmark would carry.
    fn validate_refs(&self, collection_id: &str, category_id: Option<&str>) -> Result<(), CatalogError> {
        if !self.collection_exists(collection_id) {
            return Err(CatalogError::UnknownCollection(collection_id.to_string()));
        }
        if let Some(category_id) = category_id {
            let category = self
                .find_category(category_id)
                .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))?;
            if category.collection_id != collection_id {
                return Err(CatalogError::CategoryMismatch {
                    category_id: category_id.to_string(),
                    collection_id: collection_id.to_string(),
                });
            }
        }
        Ok(())
    }

    fn ensure_default_collection(&mut self) {
        if !self.collections.iter().any(|c| c.id == DEFAULT_COLLECTION_ID) {
            warn!("stored collections lack the default collection, restoring it");
            let default = seed_collections().swap_remove(0);
            self.collections.insert(0, default);
        }
    }

    /// Categories of one collection sorted by `order`; the sort is stable so
    /// equal ranks keep their array order.
    fn sorted_category_ids(&self, collection_id: &str) -> Vec<String> {
        self.get_categories_by_collection(collection_id)
            .into_iter()
            .map(|c| c.id.clone())
            .collect()
    }
}

/// Every broken invariant in the given lists, one message each.
fn find_violations(bookmarks: &[Bookmark], collections: &[Collection], categories: &[Category]) -> Vec<String> {
    let mut violations = Vec::new();

    let mut seen = HashSet::new();
    for b in bookmarks {
        if !seen.insert(b.id.as_str()) {
            violations.push(format!("duplicate bookmark id {}", b.id));
        }
    }
    let mut seen = HashSet::new();
    for c in collections {
        if !seen.insert(c.id.as_str()) {
            violations.push(format!("duplicate collection id {}", c.id));
        }
    }
    let mut seen = HashSet::new();
    for c in categories {
        if !seen.insert(c.id.as_str()) {
            violations.push(format!("duplicate category id {}", c.id));
        }
    }

    for b in bookmarks {
        let resolves = b.collection_id == DEFAULT_COLLECTION_ID
            || collections.iter().any(|c| c.id == b.collection_id);
        if !resolves {
            violations.push(format!("bookmark {} references missing collection {}", b.id, b.collection_id));
        }
        if let Some(category_id) = &b.category_id {
            match categories.iter().find(|c| &c.id == category_id) {
                None => violations.push(format!("bookmark {} references missing category {}", b.id, category_id)),
                Some(c) if c.collection_id != b.collection_id => violations.push(format!(
                    "bookmark {} in collection {} references category {} of collection {}",
                    b.id, b.collection_id, c.id, c.collection_id
                )),
                Some(_) => {}
            }
        }
    }

    violations
}

#[async_trait]
impl CatalogManagerTrait for CatalogManager {
    /// Loads the stored catalog and resets the active filter to "all".
    async fn initialize(&mut self) -> Result<(), CatalogError> {
        self.bookmarks = self.storage.get_bookmarks().await?;
        self.collections = self.storage.get_collections().await?;
        self.categories = self.storage.get_categories().await?;
        self.active_collection_id = ALL_COLLECTIONS.to_string();
        self.ensure_default_collection();

        for violation in self.check_consistency() {
            warn!(%violation, "stored catalog is inconsistent");
        }
        info!(
            bookmarks = self.bookmarks.len(),
            collections = self.collections.len(),
            categories = self.categories.len(),
            "catalog loaded"
        );
        Ok(())
    }

    /// Adds a bookmark and returns its new ID.
    async fn add_bookmark(&mut self, data: NewBookmark) -> Result<String, CatalogError> {
        let url = normalize_url(&data.url)?;
        let collection_id = data
            .collection_id
            .unwrap_or_else(|| DEFAULT_COLLECTION_ID.to_string());
        self.validate_refs(&collection_id, data.category_id.as_deref())?;

        let id = Self::generate_id(|id| self.bookmarks.iter().any(|b| b.id == id))?;
        let before = self.snapshot();
        self.bookmarks.push(Bookmark {
            id: id.clone(),
            title: data.title,
            url,
            favicon_url: data.favicon_url,
            collection_id,
            category_id: data.category_id,
            tags: normalize_tags(&data.tags),
            note: data.note,
            highlight: data.highlight,
            tabbed: data.tabbed,
            favorite: data.favorite,
            created_at: Utc::now(),
            updated_at: None,
            last_visited: None,
            visit_count: 0,
        });
        self.commit(before, Dirty::BOOKMARKS).await?;
        debug!(%id, "bookmark added");
        Ok(id)
    }

    /// Merges `updates` into the bookmark. Returns `false` if `id` is unknown.
    ///
    /// Moving a bookmark to another collection without naming a category drops
    /// its old category, which belongs to the previous collection.
    async fn edit_bookmark(&mut self, id: &str, updates: BookmarkUpdate) -> Result<bool, CatalogError> {
        let Some(index) = self.bookmarks.iter().position(|b| b.id == id) else {
            return Ok(false);
        };

        let mut updated = self.bookmarks[index].clone();
        updates.apply_to(&mut updated)?;
        let collection_changed = updated.collection_id != self.bookmarks[index].collection_id;
        if collection_changed && updates.category_id.is_none() {
            updated.category_id = None;
        }
        self.validate_refs(&updated.collection_id, updated.category_id.as_deref())?;
        updated.updated_at = Some(Utc::now());

        let before = self.snapshot();
        self.bookmarks[index] = updated;
        self.commit(before, Dirty::BOOKMARKS).await?;
        debug!(%id, "bookmark edited");
        Ok(true)
    }

    /// Removes the bookmark. Returns `false` (and writes nothing) if `id` is unknown.
    async fn delete_bookmark(&mut self, id: &str) -> Result<bool, CatalogError> {
        let Some(index) = self.bookmarks.iter().position(|b| b.id == id) else {
            return Ok(false);
        };
        let before = self.snapshot();
        self.bookmarks.remove(index);
        self.commit(before, Dirty::BOOKMARKS).await?;
        debug!(%id, "bookmark deleted");
        Ok(true)
    }

    /// Stamps `last_visited` and bumps `visit_count`. Unknown IDs are a no-op.
    async fn record_visit(&mut self, id: &str) -> Result<bool, CatalogError> {
        let Some(index) = self.bookmarks.iter().position(|b| b.id == id) else {
            return Ok(false);
        };
        let before = self.snapshot();
        let bookmark = &mut self.bookmarks[index];
        bookmark.last_visited = Some(Utc::now());
        bookmark.visit_count += 1;
        self.commit(before, Dirty::BOOKMARKS).await?;
        Ok(true)
    }

    /// Saves a page into the default collection unless its URL is already bookmarked.
    /// Browser-internal pages (`chrome://`, `about:`, ...) are refused.
    async fn quick_save(&mut self, capture: TabCapture) -> Result<QuickSave, CatalogError> {
        let scheme = capture.url.trim().split_once(':').map(|(s, _)| s.to_ascii_lowercase());
        if !matches!(scheme.as_deref(), Some("http") | Some("https")) {
            return Err(CatalogError::NotWebPage(capture.url));
        }
        let url = normalize_url(&capture.url)?;
        if let Some(existing) = self.bookmarks.iter().find(|b| b.url == url) {
            return Ok(QuickSave::AlreadySaved(existing.id.clone()));
        }

        let title = if capture.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            capture.title
        };
        let data = NewBookmark {
            title,
            url,
            favicon_url: capture.favicon_url,
            ..NewBookmark::default()
        };
        self.add_bookmark(data).await.map(QuickSave::Saved)
    }

    /// Adds the staged current tab. The tab supplies the URL; title and icon
    /// come from `data` when given there.
    async fn add_bookmark_from_current_tab(&mut self, mut data: NewBookmark) -> Result<String, CatalogError> {
        let tab = self.current_tab.clone().ok_or(CatalogError::NoCurrentTab)?;
        data.url = tab.url;
        if data.title.trim().is_empty() {
            data.title = tab.title;
        }
        if data.favicon_url.is_none() {
            data.favicon_url = tab.favicon_url;
        }
        self.add_bookmark(data).await
    }

    /// Drag-and-drop move of a bookmark between (or within) category lists.
    ///
    /// Both lists are the bookmarks of a category narrowed to `scope` ("all" or
    /// a collection ID), in array order. Bookmarks outside the two lists keep
    /// their positions. A cross-category move rewrites `category_id`, and the
    /// collection too when the destination category lives elsewhere.
    async fn move_bookmark(&mut self, scope: &str, from: DragLocation, to: DragLocation) -> Result<(), CatalogError> {
        let in_view = |category_id: &str| {
            let category_id = category_id.to_string();
            let scope = scope.to_string();
            move |b: &Bookmark| {
                b.category_id.as_deref() == Some(category_id.as_str())
                    && (scope == ALL_COLLECTIONS || b.collection_id == scope)
            }
        };

        let source_slots = subsequence_slots(&self.bookmarks, in_view(&from.category_id));
        let slot = *source_slots
            .get(from.index)
            .ok_or(CatalogError::InvalidIndex(from.index))?;

        let same_category = from.category_id == to.category_id;
        if same_category && from.index == to.index {
            return Ok(());
        }
        let destination_collection = if same_category {
            None
        } else {
            let category = self
                .find_category(&to.category_id)
                .ok_or_else(|| CatalogError::UnknownCategory(to.category_id.clone()))?;
            Some(category.collection_id.clone())
        };

        let before = self.snapshot();
        let mut item = self.bookmarks.remove(slot);
        if let Some(collection_id) = destination_collection {
            item.category_id = Some(to.category_id.clone());
            item.collection_id = collection_id;
            item.updated_at = Some(Utc::now());
        }

        let destination_slots = subsequence_slots(&self.bookmarks, in_view(&to.category_id));
        let position = insertion_point(&destination_slots, to.index, self.bookmarks.len());
        let id = item.id.clone();
        self.bookmarks.insert(position, item);

        self.commit(before, Dirty::BOOKMARKS).await?;
        debug!(%id, from = %from.category_id, to = %to.category_id, index = to.index, "bookmark moved");
        Ok(())
    }

    async fn add_collection(&mut self, data: NewCollection) -> Result<String, CatalogError> {
        let id = Self::generate_id(|id| self.collection_exists(id))?;
        let before = self.snapshot();
        self.collections.push(Collection {
            id: id.clone(),
            name: data.name,
            color: data.color.unwrap_or_else(|| DEFAULT_COLLECTION_COLOR.to_string()),
            created_at: Some(Utc::now()),
            updated_at: None,
        });
        self.commit(before, Dirty::COLLECTIONS).await?;
        debug!(%id, "collection added");
        Ok(id)
    }

    async fn edit_collection(&mut self, id: &str, updates: CollectionUpdate) -> Result<bool, CatalogError> {
        let Some(index) = self.collections.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let before = self.snapshot();
        let collection = &mut self.collections[index];
        updates.apply_to(collection);
        collection.updated_at = Some(Utc::now());
        self.commit(before, Dirty::COLLECTIONS).await?;
        debug!(%id, "collection edited");
        Ok(true)
    }

    /// Deletes a collection after moving its bookmarks to `reassign_to`.
    ///
    /// Refuses the default collection and unknown IDs with `false`. Moved
    /// bookmarks lose their category, which belonged to the deleted
    /// collection. The collection's categories themselves are kept.
    async fn delete_collection(&mut self, id: &str, reassign_to: &str) -> Result<bool, CatalogError> {
        if id == DEFAULT_COLLECTION_ID {
            return Ok(false);
        }
        let Some(index) = self.collections.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        if reassign_to == id {
            return Err(CatalogError::SelfReassignment(id.to_string()));
        }
        if !self.collection_exists(reassign_to) {
            return Err(CatalogError::UnknownCollection(reassign_to.to_string()));
        }

        let before = self.snapshot();
        let now = Utc::now();
        let mut moved = 0usize;
        for bookmark in self.bookmarks.iter_mut().filter(|b| b.collection_id == id) {
            bookmark.collection_id = reassign_to.to_string();
            bookmark.category_id = None;
            bookmark.updated_at = Some(now);
            moved += 1;
        }
        self.collections.remove(index);

        self.commit(before, Dirty::BOOKMARKS.and(Dirty::COLLECTIONS)).await?;
        info!(%id, %reassign_to, moved, "collection deleted");
        Ok(true)
    }

    /// Appends a category after the collection's current last rank.
    ///
    /// When the last rank is already `u32::MAX` the collection is renumbered
    /// 0..n first, keeping the current order.
    async fn add_category(&mut self, collection_id: &str, name: &str) -> Result<String, CatalogError> {
        if !self.collection_exists(collection_id) {
            return Err(CatalogError::UnknownCollection(collection_id.to_string()));
        }
        let last = self
            .categories
            .iter()
            .filter(|c| c.collection_id == collection_id)
            .map(|c| c.order)
            .max();

        let id = Self::generate_id(|id| self.categories.iter().any(|c| c.id == id))?;
        let before = self.snapshot();
        let order = match last {
            None => 0,
            Some(last) => match last.checked_add(1) {
                Some(next) => next,
                None => {
                    warn!(%collection_id, "category ranks exhausted, renumbering");
                    let ids = self.sorted_category_ids(collection_id);
                    for (rank, cid) in ids.iter().enumerate() {
                        if let Some(category) = self.categories.iter_mut().find(|c| &c.id == cid) {
                            category.order = rank as u32;
                        }
                    }
                    ids.len() as u32
                }
            },
        };
        self.categories.push(Category {
            id: id.clone(),
            name: name.to_string(),
            collection_id: collection_id.to_string(),
            order,
        });
        self.commit(before, Dirty::CATEGORIES).await?;
        debug!(%id, %collection_id, order, "category added");
        Ok(id)
    }

    async fn rename_category(&mut self, id: &str, name: &str) -> Result<bool, CatalogError> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let before = self.snapshot();
        self.categories[index].name = name.to_string();
        self.commit(before, Dirty::CATEGORIES).await?;
        Ok(true)
    }

    /// Removes a category; its bookmarks stay in their collection uncategorized.
    async fn delete_category(&mut self, id: &str) -> Result<bool, CatalogError> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let before = self.snapshot();
        let now = Utc::now();
        let mut touched = Dirty::CATEGORIES;
        for bookmark in self
            .bookmarks
            .iter_mut()
            .filter(|b| b.category_id.as_deref() == Some(id))
        {
            bookmark.category_id = None;
            bookmark.updated_at = Some(now);
            touched = touched.and(Dirty::BOOKMARKS);
        }
        self.categories.remove(index);
        self.commit(before, touched).await?;
        debug!(%id, "category deleted");
        Ok(true)
    }

    /// Moves the category at rank `from` to rank `to` within one collection and
    /// renumbers that collection's categories 0..n. Other collections are untouched.
    async fn reorder_categories(&mut self, collection_id: &str, from: usize, to: usize) -> Result<(), CatalogError> {
        let mut ids = self.sorted_category_ids(collection_id);
        if from >= ids.len() {
            return Err(CatalogError::InvalidIndex(from));
        }
        if from == to {
            return Ok(());
        }

        splice_move(&mut ids, from, to);
        let before = self.snapshot();
        for (rank, id) in ids.iter().enumerate() {
            if let Some(category) = self.categories.iter_mut().find(|c| &c.id == id) {
                category.order = rank as u32;
            }
        }
        self.commit(before, Dirty::CATEGORIES).await?;
        debug!(%collection_id, from, to, "categories reordered");
        Ok(())
    }

    async fn export_data(&self) -> Result<String, CatalogError> {
        Ok(self.storage.export_data().await?)
    }

    /// Imports through the adapter, then reloads the working set from storage.
    async fn import_data(&mut self, document: &str) -> bool {
        if !self.storage.import_data(document).await {
            return false;
        }
        match self.initialize().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "reload after import failed");
                false
            }
        }
    }

    fn get_all_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn get_bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// `"all"` returns every bookmark; anything else matches `collection_id` exactly.
    fn get_bookmarks_by_collection(&self, collection_id: &str) -> Vec<&Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| collection_id == ALL_COLLECTIONS || b.collection_id == collection_id)
            .collect()
    }

    /// Case-insensitive substring search over title and URL. A blank query matches everything.
    fn search_bookmarks(&self, query: &str) -> Vec<&Bookmark> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.bookmarks.iter().collect();
        }
        self.bookmarks.iter().filter(|b| b.matches(&needle)).collect()
    }

    /// Bookmarks passing both the active collection filter and `query`.
    fn visible_bookmarks(&self, query: &str) -> Vec<&Bookmark> {
        let needle = query.trim().to_lowercase();
        self.get_bookmarks_by_collection(&self.active_collection_id)
            .into_iter()
            .filter(|b| needle.is_empty() || b.matches(&needle))
            .collect()
    }

    fn bookmark_count(&self, collection_id: &str) -> usize {
        self.get_bookmarks_by_collection(collection_id).len()
    }

    fn get_all_collections(&self) -> &[Collection] {
        &self.collections
    }

    fn get_collection_by_id(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    fn get_all_categories(&self) -> &[Category] {
        &self.categories
    }

    fn get_categories_by_collection(&self, collection_id: &str) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.collection_id == collection_id)
            .collect();
        categories.sort_by_key(|c| c.order);
        categories
    }

    fn check_consistency(&self) -> Vec<String> {
        find_violations(&self.bookmarks, &self.collections, &self.categories)
    }

    fn set_active_collection(&mut self, collection_id: &str) {
        self.active_collection_id = collection_id.to_string();
    }

    fn active_collection(&self) -> &str {
        &self.active_collection_id
    }

    fn set_current_tab(&mut self, capture: Option<TabCapture>) {
        self.current_tab = capture;
    }

    fn current_tab(&self) -> Option<&TabCapture> {
        self.current_tab.as_ref()
    }
}
