//! Key-value storage backing the page session.
//!
//! Two stores with browser-storage semantics:
//!
//! - [`PreferenceStore`]: durable across sessions, backed by a JSON file on
//!   disk (or purely in memory when no path is available). Holds the
//!   selected-language and theme preferences.
//! - [`SessionStore`]: in-memory, scoped to one page session, cleared on
//!   teardown. Holds the translation cache blob.
//!
//! Storage failures are typed but always soft at the call sites: a store
//! that cannot be read or written degrades the experience, never breaks it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Durable-store key holding the last-selected language code.
pub const PREF_LANG_KEY: &str = "lang";

/// Durable-store key holding the selected theme.
pub const PREF_THEME_KEY: &str = "theme";

/// Why a durable store operation failed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference store I/O error at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("preference store at {path} is not valid JSON")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable key-value preference store.
///
/// Values are held in memory and written through to the backing file on
/// every `set`. A store opened without a path (`in_memory`) accepts writes
/// but persists nothing.
#[derive(Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Open the store backed by `path`.
    ///
    /// A missing file yields an empty store; an unreadable or unparseable
    /// file is an error the caller decides how to soften.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| StorageError::Json {
                path: path.display().to_string(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// A store that accepts writes but persists nothing.
    ///
    /// Used as the degraded mode when the backing file is unavailable, and
    /// in tests.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: BTreeMap::new(),
        }
    }

    /// Get a stored value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and write the store through to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    /// Remove a value and write the store through to disk.
    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StorageError::Json {
                path: path.display().to_string(),
                source,
            }
        })?;
        fs::write(path, raw).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Session-scoped key-value store.
///
/// Mirrors the session-storage surface the cache needs: string items under
/// string keys, gone when the session ends.
#[derive(Debug, Default)]
pub struct SessionStore {
    items: HashMap<String, String>,
}

impl SessionStore {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an item, if present.
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    /// Set an item, overwriting any previous value.
    pub fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    /// Remove an item; absent keys are a no-op.
    pub fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    /// Drop every item (session teardown).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
