//! sqkv - JSON document key/value store over SQLite
//!
//! Values are opaque JSON documents stored by text key. Lookups can filter
//! on fields inside the documents with a Mongo-like selector language:
//!
//! ```ignore
//! use sqkv::{Database, json};
//!
//! let db = Database::open_in_memory()?;
//! let table = db.store("multi")?;
//! table.put("key0", &json!({"a": 1, "b": 2}))?;
//! table.put("key1", &json!({"a": 6, "b": 7}))?;
//!
//! let rows = table.find(&json!({"$or": [{"$.a": 1}, {"$.b": {"$gt": 5}}]}))?;
//! ```
//!
//! # Architecture
//!
//! - `sqkv-core`: selector parsing and compilation to SQL predicates (pure)
//! - `sqkv-store`: the SQLite document store that runs those predicates
//!
//! The store crate re-exports the compiler surface, so depending on this
//! facade is enough for most users.

// Re-export the public API from sqkv-store
pub use sqkv_store::*;

/// Selector compiler internals (literal encoder, predicate builders, AST)
pub use sqkv_core;

/// `serde_json::json!`, re-exported for building documents and selectors
pub use serde_json::json;
