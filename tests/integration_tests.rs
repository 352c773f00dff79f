//! Integration tests for the page session.
//!
//! These tests drive full language-change orchestrations against a mocked
//! translation server and verify the fail-soft contract: a broken load never
//! damages what the page already shows.

use site_i18n::config::Config;
use site_i18n::document::{
    Content, Document, Element, LANG_BUTTON_ATTR, PLACEHOLDER_KEY_ATTR, SELECTED_ATTR,
    TEXT_KEY_ATTR,
};
use site_i18n::i18n::Language;
use site_i18n::session::PageSession;
use site_i18n::storage::{PreferenceStore, PREF_LANG_KEY};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ==================== Test Helpers ====================

/// Create a test config pointed at the mock server.
fn create_test_config(server: &MockServer, page_url: Option<&str>) -> Config {
    let base_url = format!("{}/", server.uri());
    Config {
        page_url: page_url.map(str::to_string).unwrap_or_else(|| base_url.clone()),
        base_url,
        cache_ttl_secs: 600,
        prefs_file: "unused".to_string(),
        ga_measurement_id: None,
        latest_release_url: format!("{}/latest-release.json", server.uri()),
    }
}

/// A page with the markers the loader consumes.
fn marked_page() -> Document {
    let mut doc = Document::new();
    doc.push_element(
        Element::new("h1")
            .with_attr(TEXT_KEY_ATTR, "hero.title")
            .with_text("Welcome"),
    );
    doc.push_element(
        Element::new("a")
            .with_attr(TEXT_KEY_ATTR, "nav.about")
            .with_text("About us"),
    );
    doc.push_element(Element::new("input").with_attr(PLACEHOLDER_KEY_ATTR, "search.hint"));
    for code in ["en", "fr", "de", "es"] {
        doc.push_element(Element::new("button").with_attr(LANG_BUTTON_ATTR, code));
    }
    doc
}

/// Mount a locale resource on the mock server.
async fn mount_locale(server: &MockServer, code: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/locales/{}.json", code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn text_of<'a>(doc: &'a Document, key: &str) -> &'a str {
    doc.elements_with_attr(TEXT_KEY_ATTR)
        .find(|el| el.attr(TEXT_KEY_ATTR) == Some(key))
        .expect("marked element exists")
        .text()
}

fn selected_codes(doc: &Document) -> Vec<String> {
    doc.elements_with_attr(LANG_BUTTON_ATTR)
        .filter(|el| el.has_attr(SELECTED_ATTR))
        .map(|el| el.attr(LANG_BUTTON_ATTR).unwrap().to_string())
        .collect()
}

// ==================== Full Orchestration Tests ====================

#[tokio::test]
async fn test_set_language_applies_everything() {
    let server = MockServer::start().await;
    mount_locale(
        &server,
        "fr",
        serde_json::json!({
            "website.title": "Site d'exemple",
            "hero.title": "Bienvenue",
            "nav.about": "À propos <strong>Us</strong>",
            "search.hint": "Rechercher..."
        }),
    )
    .await;

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session
        .set_language(Language::FRENCH)
        .await
        .expect("Should succeed");

    // Text, markup, placeholder
    assert_eq!(text_of(&session.document, "hero.title"), "Bienvenue");
    let about = session
        .document
        .elements_with_attr(TEXT_KEY_ATTR)
        .find(|el| el.attr(TEXT_KEY_ATTR) == Some("nav.about"))
        .unwrap();
    assert_eq!(
        about.content(),
        &Content::Markup("À propos <strong>Us</strong>".to_string())
    );
    let input = session
        .document
        .elements_with_attr(PLACEHOLDER_KEY_ATTR)
        .next()
        .unwrap();
    assert_eq!(input.attr("placeholder"), Some("Rechercher..."));

    // Title, language attribute, current language
    assert_eq!(session.document.title, "Site d'exemple");
    assert_eq!(session.document.lang(), "fr");
    assert_eq!(session.current_language(), Language::FRENCH);

    // Preference persisted, URL rewritten, selector highlighted
    assert_eq!(session.prefs.get(PREF_LANG_KEY), Some("fr"));
    assert_eq!(session.url().query(), Some("lang=fr"));
    assert_eq!(selected_codes(&session.document), vec!["fr"]);
}

#[tokio::test]
async fn test_switching_back_and_forth_rewrites_url_param() {
    let server = MockServer::start().await;
    mount_locale(&server, "fr", serde_json::json!({"hero.title": "Bienvenue"})).await;
    mount_locale(&server, "en", serde_json::json!({"hero.title": "Welcome back"})).await;

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session.set_language(Language::FRENCH).await.expect("fr");
    session.set_language(Language::ENGLISH).await.expect("en");

    assert_eq!(text_of(&session.document, "hero.title"), "Welcome back");
    assert_eq!(session.url().query(), Some("lang=en"));
    assert_eq!(selected_codes(&session.document), vec!["en"]);
    assert_eq!(session.prefs.get(PREF_LANG_KEY), Some("en"));
}

// ==================== Caching Tests ====================

#[tokio::test]
async fn test_second_change_within_ttl_uses_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locales/fr.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"hero.title": "Bienvenue"})),
        )
        .expect(1) // the second change must not hit the network
        .mount(&server)
        .await;
    mount_locale(&server, "en", serde_json::json!({"hero.title": "Welcome back"})).await;

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session.set_language(Language::FRENCH).await.expect("fr");
    let first = session.translations().clone();

    session.set_language(Language::ENGLISH).await.expect("en");
    session.set_language(Language::FRENCH).await.expect("fr again");

    // Identical map out of the cache
    assert_eq!(session.translations(), &first);
    assert_eq!(text_of(&session.document, "hero.title"), "Bienvenue");
}

// ==================== Fail-Soft Tests ====================

#[tokio::test]
async fn test_404_leaves_previous_content_visible() {
    let server = MockServer::start().await;
    mount_locale(&server, "en", serde_json::json!({"hero.title": "Welcome"})).await;
    Mock::given(method("GET"))
        .and(path("/locales/de.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session.set_language(Language::ENGLISH).await.expect("en");
    let result = session.set_language(Language::GERMAN).await;

    // The failure is reported, not thrown
    assert!(result.is_err());

    // The language attribute and preference ran ahead of the fetch...
    assert_eq!(session.document.lang(), "de");
    assert_eq!(session.prefs.get(PREF_LANG_KEY), Some("de"));

    // ...but the visible state is untouched
    assert_eq!(text_of(&session.document, "hero.title"), "Welcome");
    assert_eq!(session.current_language(), Language::ENGLISH);
    assert_eq!(session.url().query(), Some("lang=en"));
    assert_eq!(selected_codes(&session.document), vec!["en"]);
}

#[tokio::test]
async fn test_malformed_resource_leaves_previous_content_visible() {
    let server = MockServer::start().await;
    mount_locale(&server, "en", serde_json::json!({"hero.title": "Welcome"})).await;
    Mock::given(method("GET"))
        .and(path("/locales/es.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session.set_language(Language::ENGLISH).await.expect("en");
    let result = session.set_language(Language::SPANISH).await;

    assert!(result.is_err());
    assert_eq!(text_of(&session.document, "hero.title"), "Welcome");
    assert_eq!(session.current_language(), Language::ENGLISH);
}

// ==================== Initial Load Tests ====================

#[tokio::test]
async fn test_initial_load_prefers_url_param_over_preference() {
    let server = MockServer::start().await;
    mount_locale(&server, "fr", serde_json::json!({"hero.title": "Bienvenue"})).await;

    let page_url = format!("{}/?lang=fr", server.uri());
    let config = create_test_config(&server, Some(&page_url));

    let mut prefs = PreferenceStore::in_memory();
    prefs.set(PREF_LANG_KEY, "en").unwrap();

    let mut session = PageSession::new(config, marked_page(), prefs).expect("session");
    session.load_initial_language().await;

    assert_eq!(session.current_language(), Language::FRENCH);
    assert_eq!(text_of(&session.document, "hero.title"), "Bienvenue");
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_initial_load_falls_back_to_stored_preference() {
    let server = MockServer::start().await;
    mount_locale(&server, "es", serde_json::json!({"hero.title": "Bienvenido"})).await;

    let page_url = format!("{}/?lang=nope", server.uri());
    let config = create_test_config(&server, Some(&page_url));

    let mut prefs = PreferenceStore::in_memory();
    prefs.set(PREF_LANG_KEY, "es").unwrap();

    let mut session = PageSession::new(config, marked_page(), prefs).expect("session");
    session.load_initial_language().await;

    assert_eq!(session.current_language(), Language::SPANISH);
}

#[tokio::test]
async fn test_initial_load_clears_loading_marker_on_failure() {
    let server = MockServer::start().await;
    // No locales mounted at all: every fetch 404s

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session.load_initial_language().await;

    // Fail-soft: the page is usable, the marker is gone, content untouched
    assert!(!session.is_loading());
    assert_eq!(text_of(&session.document, "hero.title"), "Welcome");
}

// ==================== Teardown Tests ====================

#[tokio::test]
async fn test_end_session_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locales/fr.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"hero.title": "Bienvenue"})),
        )
        .expect(2) // cache cleared between the two changes
        .mount(&server)
        .await;

    let config = create_test_config(&server, None);
    let mut session =
        PageSession::new(config, marked_page(), PreferenceStore::in_memory()).expect("session");

    session.set_language(Language::FRENCH).await.expect("fr");
    session.end_session();
    session.set_language(Language::FRENCH).await.expect("fr again");
}
