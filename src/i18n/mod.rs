//! Internationalization (i18n) module for multi-language support.
//!
//! This module provides a centralized, extensible architecture for managing
//! the site's languages and translation resources. All language-related
//! logic, caching, and application of translations to the page model is
//! contained here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe Language type validated against the registry
//! - `loader`: Translation resource fetching with typed failures
//! - `cache`: Session-scoped translation cache with a freshness window
//! - `apply`: Applying a translation map to the page model
//! - `validator`: Translation resource quality validation
//! - `metrics`: Translation observability and metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Language, LanguageRegistry};
//!
//! // Get the canonical language (English)
//! let canonical = Language::canonical();
//!
//! // Create a language from a code
//! let french = Language::from_code("fr")?;
//!
//! // List all enabled languages
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod apply;
mod cache;
mod language;
mod loader;
mod metrics;
mod registry;
mod validator;

pub use apply::{
    apply_document_title, apply_translations, contains_markup, highlight_selected_language,
    WEBSITE_TITLE_KEY,
};
pub use cache::{CacheEntry, TranslationCache, CACHE_KEY, DEFAULT_CACHE_TTL};
pub use language::Language;
pub use loader::{fetch_translations, load_translations, resource_url, LoadError, TranslationMap};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
