//! Page dump: the rendered document the extractor reads.
//!
//! A browser content script posts one [`PageElement`] per element in document
//! order, carrying its attributes, computed style and rendered width. The
//! [`Page::from_html`] loader builds the same shape from static HTML, using
//! inline `style` declarations in place of computed style.

use std::collections::BTreeMap;

use loupe_core::snapshot::PageMeta;
use serde::{Deserialize, Serialize};

/// One element of the rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageElement {
  /// Tag name; compared case-insensitively.
  pub tag:        String,
  pub attributes: BTreeMap<String, String>,
  /// Computed style: CSS property name (kebab-case) → value.
  pub style:      BTreeMap<String, String>,
  /// Rendered width in px (`offsetWidth`), when known.
  pub width:      Option<u32>,
}

impl PageElement {
  pub fn new(tag: impl Into<String>) -> Self {
    Self { tag: tag.into(), ..Default::default() }
  }

  /// Builder helper: set an attribute.
  pub fn with_attr(mut self, name: &str, value: &str) -> Self {
    self.attributes.insert(name.to_owned(), value.to_owned());
    self
  }

  /// Builder helper: set a computed style property.
  pub fn with_style(mut self, property: &str, value: &str) -> Self {
    self.style.insert(property.to_owned(), value.to_owned());
    self
  }

  pub fn with_width(mut self, width: u32) -> Self {
    self.width = Some(width);
    self
  }

  pub fn is(&self, tag: &str) -> bool { self.tag.eq_ignore_ascii_case(tag) }

  pub fn attr(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).map(String::as_str)
  }

  /// The raw `class` attribute, or `""`.
  pub fn class(&self) -> &str { self.attr("class").unwrap_or_default() }

  /// `[class*="needle"]`: case-sensitive substring of the class attribute.
  pub fn class_contains(&self, needle: &str) -> bool {
    self.class().contains(needle)
  }

  /// `.token`: whitespace-separated class token match.
  pub fn has_class(&self, token: &str) -> bool {
    self.class().split_whitespace().any(|c| c == token)
  }

  /// A computed style value; blank values count as absent.
  pub fn style(&self, property: &str) -> Option<&str> {
    self
      .style
      .get(property)
      .map(|v| v.trim())
      .filter(|v| !v.is_empty())
  }
}

/// A rendered document: identity, meta tags, and all elements in document
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
  pub url:      String,
  pub title:    String,
  pub meta:     PageMeta,
  pub elements: Vec<PageElement>,
}

impl Page {
  /// Build a page dump from static HTML.
  pub fn from_html(url: &str, html: &str) -> Self { crate::html::load(url, html) }
}

// ─── Inline style declarations ───────────────────────────────────────────────

/// Split a `style` attribute into `(property, value)` pairs.
///
/// Semicolons inside parentheses or quotes do not terminate a declaration
/// (`url(data:image/png;base64,…)`). Property names are lowercased and a
/// trailing `!important` is dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
  let mut out = Vec::new();
  for decl in split_declarations(style) {
    let Some((prop, value)) = decl.split_once(':') else { continue };
    let prop = prop.trim().to_ascii_lowercase();
    let value = value.trim();
    let value = value
      .strip_suffix("!important")
      .map(str::trim_end)
      .unwrap_or(value);
    if !prop.is_empty() && !value.is_empty() {
      out.push((prop, value.to_owned()));
    }
  }
  out
}

fn split_declarations(s: &str) -> Vec<&str> {
  let mut result = Vec::new();
  let mut start = 0usize;
  let mut depth = 0u32;
  let mut quote: Option<char> = None;
  for (i, c) in s.char_indices() {
    match (c, quote) {
      ('"' | '\'', None) => quote = Some(c),
      (q, Some(open)) if q == open => quote = None,
      ('(', None) => depth += 1,
      (')', None) => depth = depth.saturating_sub(1),
      (';', None) if depth == 0 => {
        result.push(&s[start..i]);
        start = i + 1;
      }
      _ => {}
    }
  }
  result.push(&s[start..]);
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn class_predicates() {
    let el = PageElement::new("A").with_attr("class", "btn btn-primary hero-card");
    assert!(el.is("a"));
    assert!(el.has_class("btn"));
    assert!(!el.has_class("card"));
    assert!(el.class_contains("card"));
    assert!(!el.class_contains("Card"));
  }

  #[test]
  fn blank_style_is_absent() {
    let el = PageElement::new("div")
      .with_style("color", "  ")
      .with_style("margin", " 4px ");
    assert_eq!(el.style("color"), None);
    assert_eq!(el.style("margin"), Some("4px"));
    assert_eq!(el.style("padding"), None);
  }

  #[test]
  fn declarations_respect_parentheses_and_important() {
    let decls = parse_declarations(
      "Color: RED; background-image: url(data:image/png;base64,AAA); \
       margin: 0 auto !important;;",
    );
    assert_eq!(
      decls,
      vec![
        ("color".to_string(), "RED".to_string()),
        (
          "background-image".to_string(),
          "url(data:image/png;base64,AAA)".to_string()
        ),
        ("margin".to_string(), "0 auto".to_string()),
      ]
    );
  }

  #[test]
  fn page_deserialises_from_sparse_json() {
    let json = r#"{
      "url": "https://example.com",
      "elements": [
        { "tag": "div", "style": { "color": "rgb(1, 2, 3)" }, "width": 640 },
        { "tag": "span" }
      ]
    }"#;
    let page: Page = serde_json::from_str(json).unwrap();
    assert_eq!(page.elements.len(), 2);
    assert_eq!(page.elements[0].width, Some(640));
    assert_eq!(page.meta.viewport, "not set");
  }
}
