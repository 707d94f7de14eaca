// BookmarkHub shared type definitions
// Each submodule defines types used across the catalog, storage and RPC layers.

pub mod bookmark;
pub mod category;
pub mod collection;
pub mod errors;
pub mod export;
pub mod settings;
