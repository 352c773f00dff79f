use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub base_url: String,
    pub page_url: String,

    // Translation cache
    pub cache_ttl_secs: u64,

    // Durable preferences
    pub prefs_file: String,

    // Analytics
    pub ga_measurement_id: Option<String>,

    // Mobile app download
    pub latest_release_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Site - base URL translation resources are served under
        let mut base_url =
            std::env::var("SITE_BASE_URL").context("SITE_BASE_URL not set")?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            // The URL the page session starts on (query params may seed the language)
            page_url: std::env::var("SITE_PAGE_URL").unwrap_or_else(|_| base_url.clone()),

            // Translation cache
            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),

            // Durable preferences
            prefs_file: std::env::var("PREFS_FILE")
                .unwrap_or_else(|_| "data/prefs.json".to_string()),

            // Analytics
            ga_measurement_id: std::env::var("GA_MEASUREMENT_ID").ok(),

            // Mobile app download - latest release descriptor, served next to
            // the locales by default
            latest_release_url: std::env::var("LATEST_RELEASE_URL")
                .unwrap_or_else(|_| format!("{}latest-release.json", base_url)),

            base_url,
        })
    }
}
