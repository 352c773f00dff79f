//! In-memory page model.
//!
//! The loader and UI helpers never touch a real DOM; they mutate this model,
//! which mirrors the handful of things the site's markup exposes: elements
//! with `data-*` markers, classes and attributes, a document title, the root
//! language attribute, and the script URLs injected into the head. Layout
//! and styling are out of scope.

use std::collections::{BTreeMap, BTreeSet};

/// Marker attribute carrying an element's text-translation key.
pub const TEXT_KEY_ATTR: &str = "data-i18n";

/// Marker attribute carrying an element's placeholder-translation key.
pub const PLACEHOLDER_KEY_ATTR: &str = "data-i18n-placeholder";

/// Marker attribute identifying a language-selector button and its code.
pub const LANG_BUTTON_ATTR: &str = "data-lang";

/// Marker toggled onto the currently selected language button.
pub const SELECTED_ATTR: &str = "data-selected";

/// Root marker set while the initial language is being resolved.
pub const LOADING_ATTR: &str = "data-loading";

/// Root marker carrying the active theme.
pub const THEME_ATTR: &str = "data-theme";

/// Element content: plain text or rendered markup.
///
/// The distinction mirrors `textContent` vs `innerHTML` — a translation
/// value containing a tag or entity is stored as `Markup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Markup(String),
}

impl Content {
    /// The raw string regardless of kind.
    pub fn as_str(&self) -> &str {
        match self {
            Content::Text(s) | Content::Markup(s) => s,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

/// A single element of the page model.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name, lowercase ("nav", "button", ...)
    pub tag: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    content: Content,
}

impl Element {
    /// Create an element with the given tag and no attributes or content.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: add a class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set plain-text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Remove an attribute; absent attributes are a no-op.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Whether the attribute is present (any value, including empty).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The element's `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the element carries the class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class; already present is a no-op.
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    /// Remove a class; absent is a no-op.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    /// The element's content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The content string regardless of kind.
    pub fn text(&self) -> &str {
        self.content.as_str()
    }

    /// Replace the content with plain text.
    pub fn set_text(&mut self, text: &str) {
        self.content = Content::Text(text.to_string());
    }

    /// Replace the content with rendered markup.
    pub fn set_markup(&mut self, markup: &str) {
        self.content = Content::Markup(markup.to_string());
    }
}

/// The page model: root attributes, title, elements, injected scripts.
#[derive(Debug, Default)]
pub struct Document {
    lang: String,
    attributes: BTreeMap<String, String>,
    /// Document title (`<title>` text)
    pub title: String,
    /// Translation key carried by the title element itself, if any
    title_key: Option<String>,
    elements: Vec<Element>,
    scripts: Vec<String>,
}

impl Document {
    /// Create an empty document with the canonical language attribute.
    pub fn new() -> Self {
        Self {
            lang: "en".to_string(),
            ..Self::default()
        }
    }

    /// The root language attribute (`<html lang>`).
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Set the root language attribute.
    pub fn set_lang(&mut self, code: &str) {
        self.lang = code.to_string();
    }

    /// Get a root attribute (`data-loading`, `data-theme`, ...).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set a root attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Remove a root attribute.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Whether a root attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The title element's own translation key, if it carries one.
    pub fn title_key(&self) -> Option<&str> {
        self.title_key.as_deref()
    }

    /// Set the title element's translation key.
    pub fn set_title_key(&mut self, key: &str) {
        self.title_key = Some(key.to_string());
    }

    /// Append an element.
    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// All elements, in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All elements carrying the attribute, in document order.
    pub fn elements_with_attr<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |el| el.has_attr(name))
    }

    /// Mutable variant of [`elements_with_attr`](Self::elements_with_attr).
    pub fn elements_with_attr_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> {
        self.elements.iter_mut().filter(move |el| el.has_attr(name))
    }

    /// The element with the given `id`, if any.
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == Some(id))
    }

    /// Mutable variant of [`element_by_id`](Self::element_by_id).
    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id() == Some(id))
    }

    /// The first element with the given tag.
    pub fn first_by_tag(&self, tag: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.tag == tag)
    }

    /// Mutable variant of [`first_by_tag`](Self::first_by_tag).
    pub fn first_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.tag == tag)
    }

    /// The first element carrying the class.
    pub fn first_by_class(&self, class: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.has_class(class))
    }

    /// Mutable variant of [`first_by_class`](Self::first_by_class).
    pub fn first_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.has_class(class))
    }

    /// Record a script URL injected into the head.
    pub fn add_script(&mut self, src: &str) {
        self.scripts.push(src.to_string());
    }

    /// Script URLs injected so far, in injection order.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}
