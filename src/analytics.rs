//! Lazy analytics bootstrap.
//!
//! The analytics script is not loaded with the page; it is injected on the
//! first user pointer interaction, once, and never again for the session.
//! Without a measurement id the loader stays disarmed.

use crate::document::Document;
use tracing::{debug, warn};

/// Base URL of the gtag loader script.
const GTAG_SCRIPT_URL: &str = "https://www.googletagmanager.com/gtag/js";

/// Loads the analytics script on first interaction.
#[derive(Debug)]
pub struct AnalyticsLoader {
    measurement_id: Option<String>,
    loaded: bool,
}

impl AnalyticsLoader {
    /// Create a loader for the given measurement id.
    ///
    /// A missing id is logged once here; the loader then ignores all
    /// interactions.
    pub fn new(measurement_id: Option<String>) -> Self {
        if measurement_id.is_none() {
            warn!("Analytics measurement id is required");
        }
        Self {
            measurement_id,
            loaded: false,
        }
    }

    /// Report a user pointer interaction (mouse move, touch).
    ///
    /// The first interaction injects the analytics script into the document;
    /// every later one is a no-op.
    pub fn notify_interaction(&mut self, document: &mut Document) {
        if self.loaded {
            return;
        }
        let Some(id) = &self.measurement_id else {
            return;
        };

        document.add_script(&format!("{}?id={}", GTAG_SCRIPT_URL, id));
        self.loaded = true;
        debug!("Analytics script injected for {}", id);
    }

    /// Whether the script has been injected.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_interaction_injects_script_once() {
        let mut doc = Document::new();
        let mut loader = AnalyticsLoader::new(Some("G-TEST123".to_string()));
        assert!(!loader.is_loaded());

        loader.notify_interaction(&mut doc);
        loader.notify_interaction(&mut doc);
        loader.notify_interaction(&mut doc);

        assert!(loader.is_loaded());
        assert_eq!(doc.scripts().len(), 1);
        assert_eq!(
            doc.scripts()[0],
            "https://www.googletagmanager.com/gtag/js?id=G-TEST123"
        );
    }

    #[test]
    fn test_missing_id_never_injects() {
        let mut doc = Document::new();
        let mut loader = AnalyticsLoader::new(None);

        loader.notify_interaction(&mut doc);

        assert!(!loader.is_loaded());
        assert!(doc.scripts().is_empty());
    }
}
