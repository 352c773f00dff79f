//! Page session: owned state and language-change orchestration.
//!
//! What the original page kept as ambient globals (current language, the
//! active translation map, the storage handles) lives here as one owned
//! context with explicit initialization and teardown. The session drives the
//! whole language lifecycle: resolving the initial language, switching
//! languages, and clearing the session cache on teardown.

use crate::config::Config;
use crate::document::{Document, LOADING_ATTR};
use crate::i18n::{
    apply_document_title, apply_translations, highlight_selected_language, load_translations,
    Language, LoadError, TranslationCache, TranslationMap,
};
use crate::storage::{PreferenceStore, SessionStore, PREF_LANG_KEY};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Query parameter reflecting and seeding the active language.
pub const LANG_QUERY_PARAM: &str = "lang";

/// One page session: the owned context everything else borrows from.
///
/// Created at page start, torn down with [`end_session`](Self::end_session).
/// Only one orchestration can run at a time (`&mut self`); the sequence
/// number pins the last-initiated-wins ordering should the fetch ever become
/// concurrent.
pub struct PageSession {
    config: Config,
    /// Shared HTTP client, also used by the UI helpers
    pub client: reqwest::Client,
    /// The page model the session mutates
    pub document: Document,
    /// Durable preferences (language, theme)
    pub prefs: PreferenceStore,
    session: SessionStore,
    cache: TranslationCache,
    url: Url,
    current_lang: Language,
    translations: TranslationMap,
    change_seq: u64,
}

impl PageSession {
    /// Initialize a session over `document` with the given configuration and
    /// preference store.
    pub fn new(config: Config, document: Document, prefs: PreferenceStore) -> Result<Self> {
        let url = Url::parse(&config.page_url)
            .with_context(|| format!("Invalid page URL: {}", config.page_url))?;
        let cache = TranslationCache::new(Duration::from_secs(config.cache_ttl_secs));

        Ok(Self {
            config,
            client: reqwest::Client::new(),
            document,
            prefs,
            session: SessionStore::new(),
            cache,
            url,
            current_lang: Language::canonical(),
            translations: TranslationMap::new(),
            change_seq: 0,
        })
    }

    /// The language currently applied to the document.
    pub fn current_language(&self) -> Language {
        self.current_lang
    }

    /// The active translation map (empty until the first successful load).
    pub fn translations(&self) -> &TranslationMap {
        &self.translations
    }

    /// The page URL, including the rewritten language parameter.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the initial load is still in flight.
    pub fn is_loading(&self) -> bool {
        self.document.has_attr(LOADING_ATTR)
    }

    /// Resolve and load the initial language.
    ///
    /// Sets the loading marker, resolves the language from the URL
    /// parameter, then the stored preference, then the default, runs a full
    /// language change, and clears the marker whether or not the load
    /// succeeded. Never fails: a broken load leaves the document as-is.
    pub async fn load_initial_language(&mut self) {
        self.document.set_attr(LOADING_ATTR, "");

        let lang = resolve_initial_language(&self.url, &self.prefs);
        debug!("Resolved initial language: {}", lang.code());

        // Failures are logged inside set_language; initial load is fail-soft
        let _ = self.set_language(lang).await;

        self.document.remove_attr(LOADING_ATTR);
    }

    /// Change the active language to `lang`.
    ///
    /// Persists the preference and sets the document language attribute
    /// before the fetch, so a failed load leaves those two ahead of the
    /// visible text (accepted fail-soft inconsistency). On success the
    /// translations are applied, the title updated, the URL parameter
    /// rewritten in place, and the selector highlight moved.
    ///
    /// Ordering under overlap is last-initiated-wins: every call takes the
    /// next sequence number, and a retrieval that finishes after a newer
    /// change was initiated is discarded.
    pub async fn set_language(&mut self, lang: Language) -> Result<(), LoadError> {
        self.change_seq += 1;
        let ticket = self.change_seq;

        // Persist selected language (soft-fail)
        if let Err(err) = self.prefs.set(PREF_LANG_KEY, lang.code()) {
            warn!("Failed to persist language preference: {}", err);
        }

        // Update the document's language attribute
        self.document.set_lang(lang.code());

        // Load translations from cache or fetch from the server
        let translations = match load_translations(
            &self.client,
            &self.config.base_url,
            &self.cache,
            &mut self.session,
            lang,
        )
        .await
        {
            Ok(translations) => translations,
            Err(err) => {
                error!("Failed to load {} translations: {}", lang.code(), err);
                return Err(err);
            }
        };

        if ticket != self.change_seq {
            debug!("Language change to {} superseded, discarding", lang.code());
            return Ok(());
        }

        // Apply translations to the current page
        apply_translations(&mut self.document, &translations);

        // Store the current language and active map on the session
        self.current_lang = lang;

        // Set the document title using the reserved key if available
        apply_document_title(&mut self.document, &translations);

        // Update the URL query param without navigation
        set_query_param(&mut self.url, LANG_QUERY_PARAM, lang.code());

        // Visually highlight the selected language in the UI
        highlight_selected_language(&mut self.document, lang);

        self.translations = translations;
        Ok(())
    }

    /// Tear the session down: drop the translation cache and every other
    /// session-scoped item (page-unload behavior).
    pub fn end_session(&mut self) {
        TranslationCache::clear(&mut self.session);
        self.session.clear();
        debug!("Page session ended, session store cleared");
    }
}

/// Resolve the language a page session starts in.
///
/// Chain: URL `lang` parameter if supported, else the stored preference if
/// supported, else the canonical default. Unsupported or absent inputs fall
/// through silently; the result is always a member of the supported set.
pub fn resolve_initial_language(url: &Url, prefs: &PreferenceStore) -> Language {
    let url_lang = url
        .query_pairs()
        .find(|(key, _)| key == LANG_QUERY_PARAM)
        .map(|(_, value)| value.into_owned());

    if let Some(lang) = url_lang.as_deref().and_then(|code| Language::from_code(code).ok()) {
        return lang;
    }

    if let Some(lang) = prefs
        .get(PREF_LANG_KEY)
        .and_then(|code| Language::from_code(code).ok())
    {
        return lang;
    }

    Language::canonical()
}

/// Rewrite one query parameter in place, preserving the others.
fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, val)| (key.into_owned(), val.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, val) in &others {
        pairs.append_pair(key, val);
    }
    pairs.append_pair(name, value);
}
