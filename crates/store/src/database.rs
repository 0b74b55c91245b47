//! Shared SQLite handle
//!
//! A [`Database`] owns one `rusqlite::Connection` behind a mutex. Cloning is
//! cheap and every clone, and every [`DocumentStore`] opened from it, shares
//! the same connection, so several tables can live in one database.

use crate::config::StoreConfig;
use crate::error::Result;
use crate::regexp;
use crate::store::DocumentStore;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Handle to an open SQLite database
///
/// # Example
///
/// ```ignore
/// let db = Database::open_in_memory()?;
/// let people = db.store("people")?;
/// people.put("p1", &json!({"name": "John Smith"}))?;
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    config: Arc<StoreConfig>,
}

impl Database {
    /// Open (or create) a database file with default settings
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(&StoreConfig::with_path(path))
    }

    /// Open a private in-memory database with default settings
    pub fn open_in_memory() -> Result<Self> {
        Self::open_with_config(&StoreConfig::default())
    }

    /// Open the database described by `config`
    pub fn open_with_config(config: &StoreConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        info!(path = %config.path, "opened database");
        Self::from_connection(conn, config.clone())
    }

    /// Wrap an already open connection
    ///
    /// Connection options from `config` are applied; its `path` is ignored.
    pub fn from_connection(conn: Connection, config: StoreConfig) -> Result<Self> {
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        if config.register_regexp {
            regexp::register(&conn)?;
        }
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config: Arc::new(config),
        })
    }

    /// Configuration this database was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open the document store for `table`, creating the table if needed
    pub fn store(&self, table: &str) -> Result<DocumentStore> {
        DocumentStore::open(self.clone(), table)
    }

    /// Names of all tables in the database
    pub fn tables(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
            let names = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(names)
        })
    }

    /// Run `f` with exclusive access to the connection
    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock();
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.config.path)
            .finish_non_exhaustive()
    }
}
