//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use rusqlite::{params, params_from_iter, Connection};
pub use serde_json::{json, Value};
pub use sqkv::{
    compile, compile_bound, ComparableValue, Database, DocumentStore, Selector, SelectorError,
    StoreConfig, StoreError,
};
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (`RUST_LOG=debug` to see it).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Numeric rows, stored under `key0`..`key7`.
pub fn dataset1() -> Vec<Value> {
    vec![
        json!({ "a": 1, "b": 2, "c": 3, "d": 4, "e": 5 }),
        json!({ "a": 6, "b": 7, "c": 8, "d": 9, "e": 10 }),
        json!({ "a": 11, "b": 12, "c": 13, "d": 14, "e": 15 }),
        json!({ "a": 16, "b": 17, "c": 18, "d": 19, "e": 20 }),
        json!({ "a": 1, "b": 2, "c": 3, "d": 4, "e": 5 }),
        json!({ "a": 6, "b": 7, "c": 8, "d": 9, "e": 10 }),
        json!({ "a": 11, "b": 12, "c": 13, "d": 14, "e": 15 }),
        json!({ "a": 16, "b": 17, "c": 18, "d": 19, "e": 20 }),
    ]
}

/// Text rows, stored under `text0`..`text2`.
pub fn data_text() -> Vec<Value> {
    vec![
        json!({ "name": "John Smith", "city": "Burbank", "path": "/some/where/john-smith.html" }),
        json!({ "name": "Ioan Iliescu", "city": "Bucuresti", "path": "/some/where/ro/iliescu.html" }),
        json!({ "name": "ALL", "city": "EVERYWHERE", "path": "index.html" }),
    ]
}

// ============================================================================
// TestDb - Document store wrapper
// ============================================================================

/// Test database wrapper.
pub struct TestDb {
    pub db: Database,
    pub dir: Option<TempDir>,
}

impl TestDb {
    /// Create an in-memory test database.
    pub fn new() -> Self {
        init_tracing();
        let db = Database::open_in_memory().expect("Failed to create test database");
        TestDb { db, dir: None }
    }

    /// Create a file-backed test database in a temp dir.
    pub fn new_file() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("test.db")).expect("Failed to create test database");
        TestDb { db, dir: Some(dir) }
    }

    /// Open (creating) a store.
    pub fn store(&self, table: &str) -> DocumentStore {
        self.db.store(table).expect("Failed to open store")
    }

    /// Store with `dataset1` loaded under `key0`..`key7`.
    pub fn multi(&self) -> DocumentStore {
        let store = self.store("multi");
        for (i, doc) in dataset1().iter().enumerate() {
            store.put(&format!("key{i}"), doc).expect("put failed");
        }
        store
    }

    /// Store with `data_text` loaded under `text0`..`text2`.
    pub fn text(&self) -> DocumentStore {
        let store = self.store("texts");
        for (i, doc) in data_text().iter().enumerate() {
            store.put(&format!("text{i}"), doc).expect("put failed");
        }
        store
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.dir.as_ref().map(|d| d.path())
    }
}

// ============================================================================
// Raw SQLite fixture - runs compiled predicates without the store
// ============================================================================

/// Bare SQLite table `docs(key, value)` with `(key, document)` rows.
pub struct RawTable {
    pub conn: Connection,
}

impl RawTable {
    pub fn new(rows: &[(&str, Value)]) -> Self {
        let conn = Connection::open_in_memory().expect("open");
        sqkv::regexp::register(&conn).expect("register regexp");
        conn.execute_batch(
            "CREATE TABLE docs (key TEXT PRIMARY KEY, value TEXT) WITHOUT ROWID;",
        )
        .expect("create");
        for (key, doc) in rows {
            conn.execute(
                "INSERT INTO docs (key, value) VALUES (?1, ?2)",
                params![key, doc.to_string()],
            )
            .expect("insert");
        }
        RawTable { conn }
    }

    /// `docs` rows keyed `r0`, `r1`, ...
    pub fn with_docs(docs: &[Value]) -> Self {
        let keys: Vec<String> = (0..docs.len()).map(|i| format!("r{i:02}")).collect();
        let rows: Vec<(&str, Value)> = keys
            .iter()
            .map(String::as_str)
            .zip(docs.iter().cloned())
            .collect();
        Self::new(&rows)
    }

    /// Keys matched by inline predicate text.
    pub fn keys_inline(&self, predicate: &str) -> rusqlite::Result<Vec<String>> {
        let sql = format!("SELECT key FROM docs WHERE {predicate} ORDER BY key");
        let mut stmt = self.conn.prepare(&sql)?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }

    /// Keys matched by a bound predicate.
    pub fn keys_bound(&self, predicate: &sqkv::BoundPredicate) -> rusqlite::Result<Vec<String>> {
        let sql = format!("SELECT key FROM docs WHERE {} ORDER BY key", predicate.sql);
        let params = sqkv::bind_params(predicate);
        let mut stmt = self.conn.prepare(&sql)?;
        let keys = stmt
            .query_map(params_from_iter(params), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }

    /// Keys matched by a selector, checked to agree between both renderings.
    pub fn select(&self, selector: &Value) -> Vec<String> {
        let inline = compile(selector).expect("compile");
        let bound = compile_bound(selector).expect("compile_bound");
        let by_inline = self.keys_inline(&inline).expect("inline query");
        let by_bound = self.keys_bound(&bound).expect("bound query");
        assert_eq!(by_inline, by_bound, "inline and bound predicates disagree");
        by_inline
    }
}
