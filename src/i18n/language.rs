//! Language type: Flexible, validated language representation.
//!
//! This module provides the `Language` type, a code that has been checked
//! against the registry. Anything user-supplied (URL parameter, stored
//! preference) goes through `from_code` before it can reach the loader.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
///
/// This type represents a language that has been validated against the registry.
/// It ensures that only supported, enabled languages can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "fr")
    code: &'static str,
}

impl Language {
    /// English, the canonical language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// French.
    pub const FRENCH: Language = Language { code: "fr" };

    /// German.
    pub const GERMAN: Language = Language { code: "de" };

    /// Spanish.
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code (e.g., "en", "fr")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    ///
    /// # Example
    /// ```ignore
    /// let french = Language::from_code("fr")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (default) language.
    ///
    /// This is the language the resolution chain falls back to when neither
    /// the URL parameter nor the stored preference yields a supported code.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    ///
    /// # Returns
    /// The language code as a static string (e.g., "en", "fr").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Returns
    /// A reference to the `LanguageConfig` for this language.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_canonical());
    }

    #[test]
    fn test_french_constant() {
        let french = Language::FRENCH;
        assert_eq!(french.code(), "fr");
        assert_eq!(french.name(), "French");
        assert!(!french.is_canonical());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_all_supported() {
        for code in ["en", "fr", "de", "es", "pt", "zh", "ja"] {
            let language = Language::from_code(code).expect("Should succeed");
            assert_eq!(language.code(), code);
        }
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("ru");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        let result = Language::from_code("");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        // Codes are lowercase by convention; "FR" is not a member of the set
        assert!(Language::from_code("FR").is_err());
    }

    // ==================== canonical Tests ====================

    #[test]
    fn test_canonical_returns_english() {
        let canonical = Language::canonical();
        assert_eq!(canonical.code(), "en");
        assert!(canonical.is_canonical());
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_language_equality() {
        let lang1 = Language::FRENCH;
        let lang2 = Language::from_code("fr").unwrap();
        assert_eq!(lang1, lang2);
    }

    #[test]
    fn test_language_inequality() {
        assert_ne!(Language::ENGLISH, Language::FRENCH);
    }

    #[test]
    fn test_language_copy() {
        let lang1 = Language::GERMAN;
        let lang2 = lang1; // Copy
        assert_eq!(lang1, lang2); // Both still valid
    }

    #[test]
    fn test_language_debug() {
        let lang = Language::SPANISH;
        let debug = format!("{:?}", lang);
        assert!(debug.contains("es"));
    }

    // ==================== Config Access Tests ====================

    #[test]
    fn test_config_access() {
        let lang = Language::GERMAN;
        let config = lang.config();
        assert_eq!(config.code, "de");
        assert_eq!(config.name, "German");
        assert_eq!(config.native_name, "Deutsch");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Language::FRENCH.native_name(), "Français");
        assert_eq!(Language::SPANISH.native_name(), "Español");
    }
}
