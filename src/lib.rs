//! Client-side interactivity core for a static marketing site.
//!
//! The page's behavior — language switching with cached translations, menu
//! and theme state, the download link, lazy analytics — is modeled as plain
//! state transitions over an in-memory page model, so all of it is testable
//! without a browser. The [`session::PageSession`] owns the per-page state
//! and drives the language lifecycle; everything else is stateless helpers.

pub mod analytics;
pub mod config;
pub mod document;
pub mod i18n;
pub mod session;
pub mod storage;
pub mod ui;
