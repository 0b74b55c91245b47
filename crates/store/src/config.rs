//! Store configuration via `sqkv.toml`
//!
//! A small TOML file naming the database location and connection options.
//! [`StoreConfig::write_default_if_missing`] seeds a commented default.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "sqkv.toml";

/// Database path that opens a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Store configuration loaded from `sqkv.toml`.
///
/// # Example
///
/// ```toml
/// path = "data/documents.db"
/// busy_timeout_ms = 5000
/// register_regexp = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,
    /// How long a statement waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Register a `regexp()` SQL function so `$regexp` selectors work.
    #[serde(default = "default_register_regexp")]
    pub register_regexp: bool,
}

fn default_path() -> String {
    MEMORY_PATH.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_register_regexp() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            register_regexp: default_register_regexp(),
        }
    }
}

impl StoreConfig {
    /// Config for a database file at `path`, other settings default.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// True when the config names an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# sqkv store configuration
#
# SQLite database file. ":memory:" keeps everything in memory (default).
path = ":memory:"

# Milliseconds a statement waits for a locked database before failing.
busy_timeout_ms = 5000

# Register a regexp() SQL function so "$regexp" selectors can run.
register_regexp = true
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this config.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| StoreError::config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            StoreError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                StoreError::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StoreError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            StoreError::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
