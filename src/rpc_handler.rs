//! RPC method handler for the BookmarkHub JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested without stdio.
//! `handle_method` dispatches one call to the catalog, settings or storage
//! layer of the shared [`App`].

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::App;
use crate::managers::catalog_manager::{CatalogManagerTrait, QuickSave};
use crate::services::settings_service::SettingsServiceTrait;
use crate::types::bookmark::{BookmarkUpdate, NewBookmark, TabCapture};
use crate::types::category::DragLocation;
use crate::types::collection::{CollectionUpdate, NewCollection, ALL_COLLECTIONS, DEFAULT_COLLECTION_ID};
use crate::types::export::export_file_name;

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn index_param(params: &Value, key: &str) -> Result<usize, String> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .ok_or_else(|| format!("missing {}", key))
}

/// Deserializes `params[key]`, or the whole params object when `key` is `None`.
fn typed_param<T: DeserializeOwned>(params: &Value, key: Option<&str>) -> Result<T, String> {
    let raw = match key {
        Some(key) => params.get(key).cloned().ok_or_else(|| format!("missing {}", key))?,
        None => params.clone(),
    };
    serde_json::from_value(raw).map_err(|e| format!("invalid params: {}", e))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Bookmarks ───
        "bookmark.add" => {
            let data: NewBookmark = typed_param(params, None)?;
            let mut a = app.lock().await;
            let id = a.catalog.add_bookmark(data).await.map_err(|e| e.to_string())?;
            let bookmark = a.catalog.get_bookmark(&id).cloned();
            to_json(bookmark)
        }
        "bookmark.edit" => {
            let id = str_param(params, "id")?;
            let updates: BookmarkUpdate = typed_param(params, Some("updates"))?;
            let mut a = app.lock().await;
            let ok = a.catalog.edit_bookmark(id, updates).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "bookmark.delete" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().await;
            let ok = a.catalog.delete_bookmark(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "bookmark.get" => {
            let id = str_param(params, "id")?;
            let a = app.lock().await;
            to_json(a.catalog.get_bookmark(id))
        }
        "bookmark.list" => {
            let collection = params
                .get("collectionId")
                .and_then(|v| v.as_str())
                .unwrap_or(ALL_COLLECTIONS);
            let a = app.lock().await;
            to_json(a.catalog.get_bookmarks_by_collection(collection))
        }
        "bookmark.search" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let a = app.lock().await;
            to_json(a.catalog.search_bookmarks(query))
        }
        "bookmark.visit" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().await;
            let ok = a.catalog.record_visit(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "bookmark.move" => {
            let from: DragLocation = typed_param(params, Some("from"))?;
            let to: DragLocation = typed_param(params, Some("to"))?;
            let mut a = app.lock().await;
            let scope = params
                .get("scope")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| a.catalog.active_collection().to_string());
            a.catalog.move_bookmark(&scope, from, to).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.quickSave" => {
            let capture: TabCapture = typed_param(params, None)?;
            let mut a = app.lock().await;
            match a.catalog.quick_save(capture).await.map_err(|e| e.to_string())? {
                QuickSave::Saved(id) => Ok(json!({"id": id, "alreadySaved": false})),
                QuickSave::AlreadySaved(id) => Ok(json!({"id": id, "alreadySaved": true})),
            }
        }
        "bookmark.addFromCurrentTab" => {
            // The URL always comes from the staged tab.
            let mut raw = if params.is_object() { params.clone() } else { json!({}) };
            if let Some(map) = raw.as_object_mut() {
                map.entry("url").or_insert(json!(""));
            }
            let data: NewBookmark = typed_param(&raw, None)?;
            let mut a = app.lock().await;
            let id = a
                .catalog
                .add_bookmark_from_current_tab(data)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }

        // ─── Collections ───
        "collection.add" => {
            let data: NewCollection = typed_param(params, None)?;
            let mut a = app.lock().await;
            let id = a.catalog.add_collection(data).await.map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "collection.edit" => {
            let id = str_param(params, "id")?;
            let updates: CollectionUpdate = typed_param(params, Some("updates"))?;
            let mut a = app.lock().await;
            let ok = a.catalog.edit_collection(id, updates).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "collection.delete" => {
            let id = str_param(params, "id")?;
            let reassign_to = params
                .get("reassignTo")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_COLLECTION_ID);
            let mut a = app.lock().await;
            let ok = a
                .catalog
                .delete_collection(id, reassign_to)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "collection.list" => {
            let a = app.lock().await;
            to_json(a.catalog.get_all_collections())
        }
        "collection.get" => {
            let id = str_param(params, "id")?;
            let a = app.lock().await;
            to_json(a.catalog.get_collection_by_id(id))
        }
        "collection.count" => {
            let id = str_param(params, "id")?;
            let a = app.lock().await;
            Ok(json!({"count": a.catalog.bookmark_count(id)}))
        }

        // ─── Categories ───
        "category.add" => {
            let collection_id = str_param(params, "collectionId")?;
            let name = str_param(params, "name")?;
            let mut a = app.lock().await;
            let id = a
                .catalog
                .add_category(collection_id, name)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "category.rename" => {
            let id = str_param(params, "id")?;
            let name = str_param(params, "name")?;
            let mut a = app.lock().await;
            let ok = a.catalog.rename_category(id, name).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "category.delete" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().await;
            let ok = a.catalog.delete_category(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": ok}))
        }
        "category.list" => {
            let collection_id = str_param(params, "collectionId")?;
            let a = app.lock().await;
            to_json(a.catalog.get_categories_by_collection(collection_id))
        }
        "category.reorder" => {
            let collection_id = str_param(params, "collectionId")?;
            let from = index_param(params, "from")?;
            let to = index_param(params, "to")?;
            let mut a = app.lock().await;
            a.catalog
                .reorder_categories(collection_id, from, to)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Popup state ───
        "catalog.setActive" => {
            let id = str_param(params, "collectionId")?;
            let mut a = app.lock().await;
            a.catalog.set_active_collection(id);
            Ok(json!({"ok": true}))
        }
        "catalog.visible" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let a = app.lock().await;
            to_json(a.catalog.visible_bookmarks(query))
        }
        "tab.setCurrent" => {
            let capture: Option<TabCapture> = match params.get("url") {
                Some(_) => Some(typed_param(params, None)?),
                None => None,
            };
            let mut a = app.lock().await;
            a.catalog.set_current_tab(capture);
            Ok(json!({"ok": true}))
        }
        "tab.getCurrent" => {
            let a = app.lock().await;
            to_json(a.catalog.current_tab())
        }
        "capture.stage" => {
            let capture: TabCapture = typed_param(params, None)?;
            let a = app.lock().await;
            a.storage
                .stage_pending_capture(&capture)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "capture.take" => {
            let a = app.lock().await;
            let capture = a.storage.take_pending_capture().await.map_err(|e| e.to_string())?;
            to_json(capture)
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            to_json(a.settings.get_settings())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            a.settings.set_value(key, value).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().await;
            a.settings.reset().await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Import / export ───
        "data.export" => {
            let a = app.lock().await;
            let content = a.catalog.export_data().await.map_err(|e| e.to_string())?;
            Ok(json!({
                "fileName": export_file_name(Utc::now().date_naive()),
                "content": content,
            }))
        }
        "data.import" => {
            let content = str_param(params, "content")?;
            let mut a = app.lock().await;
            let ok = a.import_data(content).await;
            Ok(json!({"ok": ok}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
