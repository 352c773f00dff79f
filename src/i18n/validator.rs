//! Translation resource quality validation.
//!
//! This module provides non-fatal checks over a fetched translation map:
//! empty values, keys outside the dot-delimited naming convention, and
//! unbalanced inline markup. Findings are reported, logged by the loader,
//! and never block a load.

use crate::i18n::{Language, TranslationMap};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical problems (the resource is unusable as a whole)
    pub errors: Vec<String>,

    /// Non-critical warnings about individual entries
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for fetched translation resources.
pub struct TranslationValidator;

// Regex patterns for extraction (cached for performance)
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// Tags that never take a closing counterpart.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "wbr"];

impl TranslationValidator {
    /// Validate a fetched translation map.
    ///
    /// This function checks that:
    /// - the map is not empty
    /// - no entry has an empty value
    /// - keys follow the dot-delimited `section.name` convention
    /// - inline markup opens and closes the same tags
    ///
    /// # Arguments
    /// * `lang` - The language the resource was fetched for
    /// * `translations` - The parsed translation map
    ///
    /// # Returns
    /// A `ValidationReport` containing any errors or warnings found.
    pub fn validate(lang: Language, translations: &TranslationMap) -> ValidationReport {
        let mut report = ValidationReport::new();

        if translations.is_empty() {
            report
                .errors
                .push(format!("resource for '{}' contains no entries", lang.code()));
            return report;
        }

        for (key, value) in translations {
            if value.trim().is_empty() {
                report
                    .warnings
                    .push(format!("empty translation for key '{}'", key));
            }

            if !key.contains('.') {
                report.warnings.push(format!(
                    "key '{}' is not dot-delimited (expected 'section.name')",
                    key
                ));
            }

            if let Some(tag) = Self::unbalanced_tag(value) {
                report.warnings.push(format!(
                    "unbalanced markup in '{}': tag '{}' does not close",
                    key, tag
                ));
            }
        }

        report
    }

    /// Find a tag whose open/close counts disagree, if any.
    fn unbalanced_tag(value: &str) -> Option<String> {
        let regex = TAG_REGEX.get_or_init(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)").unwrap());

        let mut balance: HashMap<String, i32> = HashMap::new();
        for cap in regex.captures_iter(value) {
            let closing = &cap[1] == "/";
            let name = cap[2].to_lowercase();
            if VOID_TAGS.contains(&name.as_str()) {
                continue;
            }
            *balance.entry(name).or_insert(0) += if closing { -1 } else { 1 };
        }

        balance
            .into_iter()
            .find(|(_, count)| *count != 0)
            .map(|(name, _)| name)
    }
}
