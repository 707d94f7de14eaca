// BookmarkHub state managers
// The catalog manager owns the working set; reorder holds the drag-and-drop helpers it shares.

pub mod catalog_manager;
pub mod reorder;
