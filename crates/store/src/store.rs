//! DocumentStore: JSON documents keyed by text in one SQLite table
//!
//! ## Table
//!
//! `"<name>" (key TEXT PRIMARY KEY, value TEXT) WITHOUT ROWID`, where `value`
//! holds the serialized JSON document. Rows are stored in key order, and
//! every listing returns them in that order.
//!
//! ## Filtering
//!
//! `find` compiles its selector with [`sqkv_core::compile_bound`] and places
//! the predicate after `WHERE`. Field paths and operands are bound as
//! parameters; no caller-supplied text is spliced into the statement.
//!
//! ## Thread Safety
//!
//! DocumentStore is `Send + Sync` and cheap to clone. All clones and all
//! stores opened from the same [`Database`] serialize on its connection.

use crate::database::Database;
use crate::error::{Result, StoreError};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension};
use serde::Serialize;
use serde_json::Value;
use crate::params::bind_params;
use sqkv_core::{BoundPredicate, Selector};
use tracing::{debug, info, warn};

/// JSON document store bound to one table
#[derive(Clone, Debug)]
pub struct DocumentStore {
    db: Database,
    table: String,
    quoted: String,
}

impl DocumentStore {
    /// Open the store for `table`, creating the table if it does not exist
    pub fn open(db: Database, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let quoted = format!("\"{table}\"");
        db.with_conn(|conn| {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {quoted} (
                    key TEXT PRIMARY KEY,
                    value TEXT
                ) WITHOUT ROWID;"
            ))?;
            Ok(())
        })?;
        info!(table, "opened document store");
        Ok(Self {
            db,
            table: table.to_string(),
            quoted,
        })
    }

    /// Name of the backing table
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Database this store lives in
    pub fn database(&self) -> &Database {
        &self.db
    }

    // ========== Single-row API ==========

    /// Store a document, inserting or overwriting
    ///
    /// Fails with [`StoreError::DuplicateOperation`] only when another writer
    /// inserts the same key between the existence check and the insert.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, document: &T) -> Result<()> {
        let text = serialize(document)?;
        self.db.with_conn(|conn| {
            if self.exists_in(conn, key)? {
                self.update_in(conn, key, &text)?;
                return Ok(());
            }
            let sql = format!("INSERT INTO {} (key, value) VALUES (?1, ?2)", self.quoted);
            match conn.execute(&sql, params![key, text]) {
                Ok(_) => {
                    debug!(table = %self.table, key, "inserted document");
                    Ok(())
                }
                Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                    warn!(table = %self.table, key, "concurrent insert of the same key");
                    Err(StoreError::DuplicateOperation {
                        key: key.to_string(),
                    })
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Overwrite the document stored under an existing key
    ///
    /// Returns `false` (and changes nothing) if the key does not exist.
    pub fn update<T: Serialize + ?Sized>(&self, key: &str, document: &T) -> Result<bool> {
        let text = serialize(document)?;
        self.db.with_conn(|conn| self.update_in(conn, key, &text))
    }

    /// Get the document stored under `key`
    ///
    /// Returns `None` if the key does not exist.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.db.with_conn(|conn| {
            let sql = format!("SELECT value FROM {} WHERE key = ?1", self.quoted);
            let mut stmt = conn.prepare_cached(&sql)?;
            let mut rows = stmt
                .query_map([key], |row| row.get::<_, SqlValue>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            match rows.len() {
                0 => Ok(None),
                1 => decode(key, rows.remove(0)).map(Some),
                count => Err(StoreError::DuplicateKey {
                    key: key.to_string(),
                    count,
                }),
            }
        })
    }

    /// Check whether a document is stored under `key`
    pub fn exists(&self, key: &str) -> Result<bool> {
        self.db.with_conn(|conn| self.exists_in(conn, key))
    }

    /// Delete the document stored under `key`
    ///
    /// Returns `true` if a document was removed.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.db.with_conn(|conn| {
            let sql = format!("DELETE FROM {} WHERE key = ?1", self.quoted);
            let removed = conn.execute(&sql, [key])?;
            debug!(table = %self.table, key, removed, "deleted document");
            Ok(removed > 0)
        })
    }

    // ========== Listing ==========

    /// List keys, optionally filtered by a SQL `LIKE` pattern
    pub fn keys(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        self.db.with_conn(|conn| {
            let keys = match pattern {
                Some(pattern) => {
                    let sql = format!(
                        "SELECT DISTINCT key FROM {} WHERE key LIKE ?1 ORDER BY key",
                        self.quoted
                    );
                    let mut stmt = conn.prepare_cached(&sql)?;
                    let keys = stmt
                        .query_map([pattern], |row| row.get(0))?
                        .collect::<rusqlite::Result<Vec<String>>>()?;
                    keys
                }
                None => {
                    let sql = format!("SELECT DISTINCT key FROM {} ORDER BY key", self.quoted);
                    let mut stmt = conn.prepare_cached(&sql)?;
                    let keys = stmt
                        .query_map([], |row| row.get(0))?
                        .collect::<rusqlite::Result<Vec<String>>>()?;
                    keys
                }
            };
            Ok(keys)
        })
    }

    /// All documents, in key order
    pub fn find_all(&self) -> Result<Vec<Value>> {
        let sql = format!("SELECT key, value FROM {} ORDER BY key", self.quoted);
        self.query_documents(&sql, Vec::new())
    }

    /// Documents matching a JSON selector, in key order
    ///
    /// Selector errors are returned as [`StoreError::Selector`], unchanged.
    /// A stored value that is not valid JSON fails the whole query with
    /// [`StoreError::CorruptRecord`] naming the first such key.
    pub fn find(&self, selector: &Value) -> Result<Vec<Value>> {
        let predicate = sqkv_core::compile_bound(selector)?;
        self.find_predicate(predicate)
    }

    /// Documents matching a parsed selector, in key order
    pub fn find_selector(&self, selector: &Selector) -> Result<Vec<Value>> {
        self.find_predicate(selector.to_predicate().to_bound_sql())
    }

    /// Drop the backing table
    ///
    /// The store is unusable afterwards; reopen it through
    /// [`Database::store`] to recreate an empty table.
    pub fn drop_table(&self) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute_batch(&format!("DROP TABLE {}", self.quoted))?;
            Ok(())
        })?;
        info!(table = %self.table, "dropped document store");
        Ok(())
    }

    // ========== Internals ==========

    fn find_predicate(&self, predicate: BoundPredicate) -> Result<Vec<Value>> {
        let sql = format!(
            "SELECT key, value FROM {} WHERE {} ORDER BY key",
            self.quoted, predicate.sql
        );
        debug!(table = %self.table, predicate = %predicate.sql, "find");
        match self.query_documents(&sql, bind_params(&predicate)) {
            Err(StoreError::Sqlite(e)) if is_malformed_json(&e) => Err(self.corrupt_record(e)?),
            result => result,
        }
    }

    /// `json_extract` rejects a stored value before it is decoded; report
    /// the first unreadable row as the corrupt record.
    fn corrupt_record(&self, cause: rusqlite::Error) -> Result<StoreError> {
        let sql = format!(
            "SELECT key FROM {} WHERE typeof(value) <> 'text' OR json_valid(value) = 0 \
             ORDER BY key LIMIT 1",
            self.quoted
        );
        let key: Option<String> = self
            .db
            .with_conn(|conn| Ok(conn.query_row(&sql, [], |row| row.get(0)).optional()?))?;
        Ok(match key {
            Some(key) => {
                warn!(table = %self.table, key = %key, "stored value is not valid JSON");
                StoreError::CorruptRecord {
                    key,
                    reason: cause.to_string(),
                }
            }
            None => StoreError::Sqlite(cause),
        })
    }

    fn query_documents(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Value>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(sql)?;
            let rows = stmt
                .query_map(params_from_iter(params), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, SqlValue>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.into_iter()
                .map(|(key, raw)| decode(&key, raw))
                .collect()
        })
    }

    fn exists_in(&self, conn: &Connection, key: &str) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE key = ?1", self.quoted);
        let found = conn
            .prepare_cached(&sql)?
            .query_row([key], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn update_in(&self, conn: &Connection, key: &str, text: &str) -> Result<bool> {
        let sql = format!("UPDATE {} SET value = ?2 WHERE key = ?1", self.quoted);
        let changed = conn.execute(&sql, params![key, text])?;
        debug!(table = %self.table, key, changed, "updated document");
        Ok(changed > 0)
    }
}

/// Table names are plain identifiers so they can be quoted without escaping
fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    let reserved = name.to_ascii_lowercase().starts_with("sqlite_");
    if valid_start && valid_rest && !reserved {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName {
            name: name.to_string(),
        })
    }
}

fn is_malformed_json(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("malformed JSON"))
}

fn serialize<T: Serialize + ?Sized>(document: &T) -> Result<String> {
    serde_json::to_string(document).map_err(|e| StoreError::Serialization {
        reason: e.to_string(),
    })
}

fn decode(key: &str, raw: SqlValue) -> Result<Value> {
    let text = match raw {
        SqlValue::Text(text) => text,
        other => {
            warn!(key, "stored value is not text");
            return Err(StoreError::CorruptRecord {
                key: key.to_string(),
                reason: format!("expected TEXT column, got {:?}", other.data_type()),
            });
        }
    };
    serde_json::from_str(&text).map_err(|e| {
        warn!(key, error = %e, "stored value is not valid JSON");
        StoreError::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}
