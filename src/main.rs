use anyhow::Result;
use site_i18n::analytics::AnalyticsLoader;
use site_i18n::config::Config;
use site_i18n::document::{Document, Element, LANG_BUTTON_ATTR, PLACEHOLDER_KEY_ATTR, TEXT_KEY_ATTR};
use site_i18n::i18n::{LanguageRegistry, WEBSITE_TITLE_KEY};
use site_i18n::session::PageSession;
use site_i18n::storage::PreferenceStore;
use site_i18n::ui;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_i18n=info".parse()?),
        )
        .init();

    info!("Starting page session");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Durable preferences; degrade to in-memory if the file is unusable
    let prefs = match PreferenceStore::open(&config.prefs_file) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!("Preference store unavailable ({}), continuing in memory", err);
            PreferenceStore::in_memory()
        }
    };

    let mut session = PageSession::new(config.clone(), landing_page(), prefs)?;

    // Resolve and apply the initial language
    session.load_initial_language().await;
    info!("Active language: {}", session.current_language().code());

    // Initialize the page chrome
    ui::init_theme_toggle(&mut session.document, &session.prefs);
    ui::update_footer_year(&mut session.document);
    ui::update_download_link(&session.client, &config, &mut session.document).await;

    // Analytics loads lazily; the host shell forwards the first pointer
    // interaction, simulated here
    let mut analytics = AnalyticsLoader::new(config.ga_measurement_id.clone());
    analytics.notify_interaction(&mut session.document);

    info!("Page title: {}", session.document.title);
    info!("Page URL: {}", session.url());

    session.end_session();
    info!("Page session closed");
    Ok(())
}

/// The landing page's marked-up structure, mirroring the static markup.
fn landing_page() -> Document {
    let mut doc = Document::new();
    doc.set_title_key(WEBSITE_TITLE_KEY);

    doc.push_element(Element::new("header"));
    doc.push_element(Element::new("nav"));
    doc.push_element(
        Element::new("button")
            .with_class("hamburger")
            .with_attr("aria-expanded", "false"),
    );

    doc.push_element(Element::new("h1").with_attr(TEXT_KEY_ATTR, "hero.title"));
    doc.push_element(Element::new("p").with_attr(TEXT_KEY_ATTR, "hero.subtitle"));
    doc.push_element(Element::new("a").with_attr(TEXT_KEY_ATTR, "nav.about"));
    doc.push_element(Element::new("input").with_attr(PLACEHOLDER_KEY_ATTR, "search.hint"));

    doc.push_element(
        Element::new("button")
            .with_attr("id", "lang-toggle")
            .with_attr("aria-expanded", "false"),
    );
    let mut lang_menu = Element::new("div").with_attr("id", "lang-menu");
    lang_menu.set_attr("hidden", "");
    doc.push_element(lang_menu);
    for lang in LanguageRegistry::get().list_enabled() {
        doc.push_element(
            Element::new("button")
                .with_attr(LANG_BUTTON_ATTR, lang.code)
                .with_text(lang.native_name),
        );
    }

    doc.push_element(Element::new("button").with_attr("id", "theme-toggle"));
    doc.push_element(Element::new("span").with_class("icon-sun"));
    doc.push_element(Element::new("span").with_class("icon-moon"));

    doc.push_element(Element::new("a").with_attr("id", "download-mobile-app"));
    doc.push_element(Element::new("section").with_attr("id", "demo-mobile-app"));
    doc.push_element(Element::new("span").with_attr("id", "year"));

    doc
}
