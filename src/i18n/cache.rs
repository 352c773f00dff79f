//! Session-scoped translation cache with a freshness window.
//!
//! Translation maps are cached per language under a single well-known key in
//! the session store, as one JSON-encoded map from language code to
//! `{timestamp, translations}`. An entry older than the TTL is treated as
//! absent, so a page session re-fetches at most once per window.

use crate::i18n::{Language, TranslationMap};
use crate::storage::SessionStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// The key used to store language translations in the session store.
pub const CACHE_KEY: &str = "i18n-cache";

/// Default time-to-live for cached translations: 10 minutes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// A cached translation map together with its capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Capture time, unix milliseconds
    pub timestamp: i64,

    /// The translation map fetched at `timestamp`
    pub translations: TranslationMap,
}

/// Freshness policy over the session store's cache key.
///
/// The cache itself holds no data; it reads and writes the JSON blob under
/// [`CACHE_KEY`] in whatever [`SessionStore`] it is handed. Corrupt or
/// unreadable blobs are treated as an empty cache, never as an error.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    ttl: Duration,
}

impl TranslationCache {
    /// Create a cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get translations for `lang` from the cache, if present and fresh.
    ///
    /// Returns `None` when there is no entry, the entry is older than the
    /// TTL, or the stored blob cannot be decoded.
    pub fn get(&self, store: &SessionStore, lang: Language) -> Option<TranslationMap> {
        let entries = read_entries(store);
        let entry = entries.get(lang.code())?;

        let age_ms = Utc::now().timestamp_millis() - entry.timestamp;
        if age_ms > self.ttl.as_millis() as i64 {
            return None;
        }
        Some(entry.translations.clone())
    }

    /// Store translations for `lang`, overwriting any previous entry.
    ///
    /// A write failure is logged and swallowed; the worst case is a fetch on
    /// the next language change instead of a cache hit.
    pub fn put(&self, store: &mut SessionStore, lang: Language, translations: &TranslationMap) {
        let mut entries = read_entries(store);
        entries.insert(
            lang.code().to_string(),
            CacheEntry {
                timestamp: Utc::now().timestamp_millis(),
                translations: translations.clone(),
            },
        );

        match serde_json::to_string(&entries) {
            Ok(raw) => store.set_item(CACHE_KEY, &raw),
            Err(err) => warn!("Failed to cache translations for \"{}\": {}", lang.code(), err),
        }
    }

    /// Drop the cache key entirely (page-unload behavior).
    pub fn clear(store: &mut SessionStore) {
        store.remove_item(CACHE_KEY);
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Decode the whole cache blob; absent or malformed blobs yield an empty map.
fn read_entries(store: &SessionStore) -> HashMap<String, CacheEntry> {
    store
        .get_item(CACHE_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}
