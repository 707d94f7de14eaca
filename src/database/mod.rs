//! BookmarkHub database layer.
//!
//! Provides SQLite connection management and schema migrations for the
//! persistent key-value store.
//!
//! # Usage
//!
//! ```no_run
//! use bookmarkhub::database::Database;
//!
//! let db = Database::open("bookmarkhub.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
