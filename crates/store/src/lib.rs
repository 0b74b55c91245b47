//! SQLite-backed JSON document store
//!
//! Each [`DocumentStore`] owns one two-column table (`key`, `value`) and
//! stores opaque JSON documents by text key. Lookups by content go through
//! [`DocumentStore::find`], which compiles a Mongo-like selector with
//! [`sqkv_core`] into a `WHERE` predicate over `json_extract`.
//!
//! # Quick Start
//!
//! ```
//! use serde_json::json;
//! use sqkv_store::Database;
//!
//! let db = Database::open_in_memory()?;
//! let people = db.store("people")?;
//! people.put("p1", &json!({"name": "John Smith", "age": 42}))?;
//! people.put("p2", &json!({"name": "Ioan Iliescu", "age": 30}))?;
//!
//! let found = people.find(&json!({"$.name": {"$like": "%Smith%"}}))?;
//! assert_eq!(found, vec![json!({"name": "John Smith", "age": 42})]);
//! # Ok::<(), sqkv_store::StoreError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod database;
pub mod error;
pub mod params;
pub mod regexp;
pub mod store;

pub use config::{StoreConfig, CONFIG_FILE_NAME, MEMORY_PATH};
pub use database::Database;
pub use error::{Result, StoreError};
pub use params::{bind_params, to_sql_value};
pub use store::DocumentStore;

pub use sqkv_core::{
    compile, compile_bound, BoundPredicate, Clause, CompareOp, ComparableValue, FieldOperator,
    FieldPath, Selector, SelectorError, UnaryDirective,
};
