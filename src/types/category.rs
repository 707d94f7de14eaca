use serde::{Deserialize, Serialize};

/// Ordered sub-grouping inside a collection, used for drag-and-drop layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub collection_id: String,
    #[serde(default)]
    pub order: u32,
}

/// One end of a drag: a category's bookmark list and an index into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub category_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(category_id: &str, index: usize) -> Self {
        Self {
            category_id: category_id.to_string(),
            index,
        }
    }
}
