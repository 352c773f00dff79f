//! Applying a translation map to the page model.
//!
//! Two passes mirror the two document markers: text content (which may be
//! rendered markup) and input placeholders. A key missing from the map leaves
//! the element's existing content untouched, so a sparse resource never
//! blanks already-visible text. Both passes tolerate documents with no
//! marked elements.

use crate::document::{
    Document, LANG_BUTTON_ATTR, PLACEHOLDER_KEY_ATTR, SELECTED_ATTR, TEXT_KEY_ATTR,
};
use crate::i18n::{Language, TranslationMap};
use regex::Regex;
use std::sync::OnceLock;

/// Reserved key used for the document title when the title element carries
/// no marker of its own.
pub const WEBSITE_TITLE_KEY: &str = "website.title";

static MARKUP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether a translation value contains HTML markup or an entity and must be
/// set as rendered markup rather than plain text.
pub fn contains_markup(value: &str) -> bool {
    let tag = MARKUP_TAG_REGEX.get_or_init(|| Regex::new(r"(?is)</?[a-z].*>").unwrap());
    let entity = ENTITY_REGEX.get_or_init(|| Regex::new(r"&[a-z]+;").unwrap());
    tag.is_match(value) || entity.is_match(value)
}

/// Apply `translations` to every marked element of `document`.
///
/// Elements tagged with the text marker get their content replaced (markup
/// or plain text, depending on the value); elements tagged with the
/// placeholder marker get their `placeholder` attribute set. Unresolved keys
/// are skipped. Applying the same map twice is idempotent.
pub fn apply_translations(document: &mut Document, translations: &TranslationMap) {
    // Text content (supports markup)
    for el in document.elements_with_attr_mut(TEXT_KEY_ATTR) {
        let Some(value) = el.attr(TEXT_KEY_ATTR).and_then(|key| translations.get(key)) else {
            continue;
        };
        if contains_markup(value) {
            el.set_markup(value);
        } else {
            el.set_text(value);
        }
    }

    // Placeholders
    for el in document.elements_with_attr_mut(PLACEHOLDER_KEY_ATTR) {
        let Some(value) = el
            .attr(PLACEHOLDER_KEY_ATTR)
            .and_then(|key| translations.get(key))
        else {
            continue;
        };
        el.set_attr("placeholder", value);
    }
}

/// Update the document title from `translations`.
///
/// The title element's own marker key wins when it resolves; otherwise the
/// reserved [`WEBSITE_TITLE_KEY`] is used when present. Neither resolving
/// leaves the title unchanged.
pub fn apply_document_title(document: &mut Document, translations: &TranslationMap) {
    let value = document
        .title_key()
        .and_then(|key| translations.get(key))
        .or_else(|| translations.get(WEBSITE_TITLE_KEY));

    if let Some(value) = value {
        document.title = value.clone();
    }
}

/// Move the selected marker to the language button matching `lang`.
///
/// Every language-selector button loses the marker; the one whose code
/// matches gains it.
pub fn highlight_selected_language(document: &mut Document, lang: Language) {
    for btn in document.elements_with_attr_mut(LANG_BUTTON_ATTR) {
        btn.remove_attr(SELECTED_ATTR);
        if btn.attr(LANG_BUTTON_ATTR) == Some(lang.code()) {
            btn.set_attr(SELECTED_ATTR, "true");
        }
    }
}
