//! Translation resource loading.
//!
//! A translation resource is one JSON object per language, served at
//! `{base}locales/{code}.json`, mapping dot-delimited keys to display
//! strings. Retrieval goes through the session cache first; only a miss or a
//! stale entry touches the network. Every failure mode is a typed error so
//! callers can stay fail-soft without string matching.

use crate::i18n::{Language, TranslationCache, TranslationMetrics, TranslationValidator};
use crate::storage::SessionStore;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// A full set of translations for one language: dot-delimited key to display
/// string. Values may contain inline markup.
pub type TranslationMap = HashMap<String, String>;

/// Why a translation resource could not be loaded.
///
/// All three variants are soft at the call sites: the document keeps its
/// previous text and the failure is logged.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("translation resource for '{lang}' returned HTTP {status}")]
    Status {
        lang: &'static str,
        status: reqwest::StatusCode,
    },

    /// The request never produced a usable response.
    #[error("failed to fetch translation resource for '{lang}'")]
    Network {
        lang: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a JSON string map.
    #[error("translation resource for '{lang}' is not a valid string map")]
    Malformed {
        lang: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The URL a language's translation resource is served at.
///
/// `base_url` is expected to end with a slash (the config layer normalizes
/// this).
pub fn resource_url(base_url: &str, lang: Language) -> String {
    format!("{}locales/{}.json", base_url, lang.code())
}

/// Fetch the translation resource for `lang` from the network.
///
/// # Returns
/// The parsed translation map, or a [`LoadError`] describing the failure.
/// No retry is attempted; the caller decides whether to degrade.
pub async fn fetch_translations(
    client: &reqwest::Client,
    base_url: &str,
    lang: Language,
) -> Result<TranslationMap, LoadError> {
    let metrics = TranslationMetrics::global();
    metrics.record_fetch_call();

    let url = resource_url(base_url, lang);
    debug!("Fetching translations from {}", url);

    let response = client.get(&url).send().await.map_err(|source| {
        metrics.record_fetch_failure();
        LoadError::Network {
            lang: lang.code(),
            source,
        }
    })?;

    if !response.status().is_success() {
        metrics.record_fetch_failure();
        return Err(LoadError::Status {
            lang: lang.code(),
            status: response.status(),
        });
    }

    let body = response.text().await.map_err(|source| {
        metrics.record_fetch_failure();
        LoadError::Network {
            lang: lang.code(),
            source,
        }
    })?;

    let translations: TranslationMap = serde_json::from_str(&body).map_err(|source| {
        metrics.record_fetch_failure();
        LoadError::Malformed {
            lang: lang.code(),
            source,
        }
    })?;

    Ok(translations)
}

/// Load translations for `lang`, consulting the session cache first.
///
/// A fresh cache entry short-circuits the network entirely. On a miss the
/// resource is fetched, quality-checked (warnings only), cached, and
/// returned. Failures propagate untouched so the orchestration can leave the
/// document in its previous state.
pub async fn load_translations(
    client: &reqwest::Client,
    base_url: &str,
    cache: &TranslationCache,
    store: &mut SessionStore,
    lang: Language,
) -> Result<TranslationMap, LoadError> {
    let metrics = TranslationMetrics::global();

    if let Some(translations) = cache.get(store, lang) {
        metrics.record_cache_hit();
        debug!("Using cached translations for \"{}\"", lang.code());
        return Ok(translations);
    }
    metrics.record_cache_miss();

    let translations = fetch_translations(client, base_url, lang).await?;

    let report = TranslationValidator::validate(lang, &translations);
    for warning in &report.warnings {
        warn!(
            "Translation resource for {} ({}): {}",
            lang.name(),
            lang.code(),
            warning
        );
    }
    for error in &report.errors {
        warn!(
            "Translation resource for {} ({}): {}",
            lang.name(),
            lang.code(),
            error
        );
    }

    cache.put(store, lang, &translations);
    Ok(translations)
}
