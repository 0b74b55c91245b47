//! Error types for the document store
//!
//! Selector errors pass through unchanged in [`StoreError::Selector`]; they are
//! never reported as storage failures.

use sqkv_core::SelectorError;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The selector passed to `find` could not be compiled
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// SQLite reported an error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value is not valid serialized JSON
    #[error("corrupt record for key {key}: {reason}")]
    CorruptRecord {
        /// Key of the offending row
        key: String,
        /// What was wrong with the stored value
        reason: String,
    },

    /// More than one row matched a primary key lookup
    #[error("found {count} rows for key {key}")]
    DuplicateKey {
        /// Looked-up key
        key: String,
        /// Number of rows returned
        count: usize,
    },

    /// Insert lost a race with a concurrent insert of the same key
    #[error("duplicate insert for key {key}")]
    DuplicateOperation {
        /// Contended key
        key: String,
    },

    /// Table name is not a plain SQL identifier
    #[error("invalid table name: {name:?}")]
    InvalidTableName {
        /// Rejected name
        name: String,
    },

    /// A document could not be serialized for storage
    #[error("serialization error: {reason}")]
    Serialization {
        /// Serializer message
        reason: String,
    },

    /// Configuration could not be read, parsed or written
    #[error("config error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl StoreError {
    /// True when the error came from the selector rather than the database
    pub fn is_selector_error(&self) -> bool {
        matches!(self, StoreError::Selector(_))
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        StoreError::Config {
            reason: reason.into(),
        }
    }
}
