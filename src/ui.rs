//! Menu, theme, and chrome helpers.
//!
//! Everything here is a small state transition over the page model, driven
//! by the host shell's events (clicks, scroll). Missing elements make each
//! helper a no-op; the marketing pages don't all carry the same chrome.

use crate::config::Config;
use crate::document::{Document, THEME_ATTR};
use crate::storage::{PreferenceStore, PREF_THEME_KEY};
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::{error, warn};

/// Scroll offset past which the header gets its scrolled styling.
pub const SCROLL_THRESHOLD: i64 = 10;

/// Toggle the hamburger button and the navigation menu.
///
/// Flips the `active` class on both and keeps the button's `aria-expanded`
/// attribute in sync.
pub fn toggle_hamburger_menu(document: &mut Document) {
    if document.first_by_tag("nav").is_none() {
        return;
    }
    let Some(hamburger) = document.first_by_class_mut("hamburger") else {
        return;
    };

    let expanded = hamburger.attr("aria-expanded") == Some("true");
    hamburger.set_attr("aria-expanded", if expanded { "false" } else { "true" });
    hamburger.toggle_class("active");

    if let Some(nav) = document.first_by_tag_mut("nav") {
        nav.toggle_class("active");
    }
}

/// Add or remove the header's `scrolled` class based on the scroll offset.
pub fn apply_header_scroll(document: &mut Document, scroll_y: i64) {
    let Some(header) = document.first_by_tag_mut("header") else {
        return;
    };

    if scroll_y > SCROLL_THRESHOLD {
        header.add_class("scrolled");
    } else {
        header.remove_class("scrolled");
    }
}

/// Toggle the language-selector popup open or closed.
pub fn toggle_language_menu(document: &mut Document) {
    if document.element_by_id("lang-menu").is_none() {
        return;
    }
    let Some(toggle) = document.element_by_id_mut("lang-toggle") else {
        return;
    };

    let expanded = toggle.attr("aria-expanded") == Some("true");
    toggle.set_attr("aria-expanded", if expanded { "false" } else { "true" });

    if let Some(menu) = document.element_by_id_mut("lang-menu") {
        if expanded {
            menu.set_attr("hidden", "");
        } else {
            menu.remove_attr("hidden");
        }
    }
}

/// Close the language-selector popup (outside click, selection made).
pub fn close_language_menu(document: &mut Document) {
    if let Some(toggle) = document.element_by_id_mut("lang-toggle") {
        toggle.set_attr("aria-expanded", "false");
    }
    if let Some(menu) = document.element_by_id_mut("lang-menu") {
        menu.set_attr("hidden", "");
    }
}

/// Initialize the theme from the durable preference (default light) and
/// reflect it on the root attribute and the toggle button.
pub fn init_theme_toggle(document: &mut Document, prefs: &PreferenceStore) {
    if document.element_by_id("theme-toggle").is_none() {
        return;
    }

    let saved = prefs.get(PREF_THEME_KEY).unwrap_or("light").to_string();
    document.set_attr(THEME_ATTR, &saved);
    update_toggle_icon(document, &saved);
}

/// Flip between light and dark, persist the choice, and update the UI.
pub fn toggle_theme(document: &mut Document, prefs: &mut PreferenceStore) {
    if document.element_by_id("theme-toggle").is_none() {
        return;
    }

    let current = document.attr(THEME_ATTR).unwrap_or("light").to_string();
    let new_theme = if current == "dark" { "light" } else { "dark" };

    document.set_attr(THEME_ATTR, new_theme);
    if let Err(err) = prefs.set(PREF_THEME_KEY, new_theme) {
        warn!("Failed to persist theme preference: {}", err);
    }
    update_toggle_icon(document, new_theme);
}

/// Reflect the theme on the toggle button: `aria-pressed` plus which of the
/// sun/moon icons is visible.
fn update_toggle_icon(document: &mut Document, theme: &str) {
    let dark = theme == "dark";

    if let Some(button) = document.element_by_id_mut("theme-toggle") {
        button.set_attr("aria-pressed", if dark { "true" } else { "false" });
    }
    if let Some(sun) = document.first_by_class_mut("icon-sun") {
        if dark {
            sun.remove_attr("hidden");
        } else {
            sun.set_attr("hidden", "");
        }
    }
    if let Some(moon) = document.first_by_class_mut("icon-moon") {
        if dark {
            moon.set_attr("hidden", "");
        } else {
            moon.remove_attr("hidden");
        }
    }
}

/// Latest-release descriptor served next to the site.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    #[serde(rename = "latestApkUrl")]
    latest_apk_url: Option<String>,
}

/// Point the mobile-app download link at the latest release.
///
/// On any failure the demo-app section is hidden instead; the rest of the
/// page is unaffected.
pub async fn update_download_link(
    client: &reqwest::Client,
    config: &Config,
    document: &mut Document,
) {
    match fetch_latest_release(client, &config.latest_release_url).await {
        Ok(release) => {
            if let (Some(link), Some(apk_url)) = (
                document.element_by_id_mut("download-mobile-app"),
                release.latest_apk_url,
            ) {
                link.set_attr("href", &apk_url);
            }
        }
        Err(err) => {
            error!("{:#}", err);
            if let Some(section) = document.element_by_id_mut("demo-mobile-app") {
                section.set_attr("hidden", "");
            }
        }
    }
}

/// Fetch the latest-release descriptor, cache-busted per request.
async fn fetch_latest_release(client: &reqwest::Client, url: &str) -> Result<LatestRelease> {
    let cache_busted = format!("{}?t={}", url, Utc::now().timestamp_millis());
    let response = client
        .get(&cache_busted)
        .send()
        .await
        .context("Failed to fetch latest release info")?;

    if !response.status().is_success() {
        bail!(
            "Latest release request returned HTTP {}",
            response.status()
        );
    }

    response
        .json()
        .await
        .context("Failed to parse latest release info")
}

/// Write the current year into the footer year element.
pub fn update_footer_year(document: &mut Document) {
    if let Some(year) = document.element_by_id_mut("year") {
        year.set_text(&Utc::now().year().to_string());
    }
}
