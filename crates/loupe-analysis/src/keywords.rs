//! Keyword enrichment for search.
//!
//! The persisted keyword list is the generator's own keywords plus tags
//! derived from the resolved fields and the page hostname, de-duplicated in
//! first-insertion order.

use std::collections::HashSet;

use loupe_core::{analysis::AnalysisFields, snapshot::DesignSnapshot};
use url::Url;

/// Tags appended to every record.
pub const COMMON_TAGS: [&str; 5] = ["design", "ui", "ux", "inspiration", "reference"];

/// `(needle, tags)`: when the lowercased field contains `needle`, add `tags`.
type TagRule = (&'static str, &'static [&'static str]);

const STYLE_TAGS: &[TagRule] = &[
  ("minimal", &["minimalism"]),
  ("clean", &["clean"]),
  ("modern", &["modern"]),
  ("professional", &["professional"]),
];

const TYPE_TAGS: &[TagRule] = &[
  ("landing", &["landing page"]),
  ("dashboard", &["dashboard"]),
];

const COLOR_TAGS: &[TagRule] = &[
  ("white", &["white background"]),
  ("#fff", &["white"]),
  ("black", &["black"]),
  ("#000", &["black"]),
  ("gray", &["neutral", "grayscale"]),
  ("grey", &["neutral", "grayscale"]),
  ("green", &["green accent"]),
  ("blue", &["blue accent"]),
  ("red", &["red accent"]),
  ("orange", &["orange accent"]),
];

const EFFECT_TAGS: &[TagRule] = &[
  ("blur", &["glassmorphism", "frosted"]),
  ("gradient", &["gradient"]),
  ("animation", &["animated"]),
  ("hover", &["hover effects"]),
  ("sticky", &["sticky header"]),
  ("grid", &["grid layout"]),
  ("flex", &["flexbox"]),
];

const HOST_TAGS: &[TagRule] = &[
  ("bio", &["biotech", "science", "healthcare", "pharmaceutical"]),
  ("tech", &["biotech", "science", "healthcare", "pharmaceutical"]),
  ("science", &["biotech", "science", "healthcare", "pharmaceutical"]),
  ("saas", &["saas"]),
  ("app", &["saas"]),
  ("shop", &["ecommerce"]),
  ("store", &["ecommerce"]),
  ("portfolio", &["portfolio"]),
  ("design", &["portfolio"]),
];

/// Insertion-ordered set of keywords.
#[derive(Default)]
struct KeywordSet {
  seen:  HashSet<String>,
  order: Vec<String>,
}

impl KeywordSet {
  fn add(&mut self, keyword: &str) {
    let keyword = keyword.trim();
    if !keyword.is_empty() && self.seen.insert(keyword.to_owned()) {
      self.order.push(keyword.to_owned());
    }
  }

  fn add_matching(&mut self, haystack: &str, rules: &[TagRule]) {
    let haystack = haystack.to_lowercase();
    for (needle, tags) in rules {
      if haystack.contains(needle) {
        tags.iter().for_each(|t| self.add(t));
      }
    }
  }

  fn join(self) -> String { self.order.join(", ") }
}

/// Hostname without a leading `www.`, or `None` for an unparseable URL.
fn bare_host(url: &str) -> Option<String> {
  let parsed = Url::parse(url).ok()?;
  let host = parsed.host_str()?;
  Some(host.strip_prefix("www.").unwrap_or(host).to_owned())
}

/// The enriched keyword string for a record with resolved `fields`.
pub fn enrich(snapshot: &DesignSnapshot, fields: &AnalysisFields) -> String {
  let mut set = KeywordSet::default();

  fields.keywords.split(',').for_each(|k| set.add(k));

  set.add(&fields.style_category);
  set.add_matching(&fields.style_category, STYLE_TAGS);

  set.add(&fields.kind);
  set.add_matching(&fields.kind, TYPE_TAGS);

  set.add_matching(&fields.primary_colors, COLOR_TAGS);
  set.add_matching(&fields.effects_animation, EFFECT_TAGS);

  if let Some(host) = bare_host(&snapshot.url) {
    set.add_matching(&host, HOST_TAGS);
  }

  COMMON_TAGS.iter().for_each(|t| set.add(t));
  set.join()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn snapshot(url: &str) -> DesignSnapshot {
    serde_json::from_value(json!({ "url": url })).unwrap()
  }

  fn fields(style: &str, kind: &str, keywords: &str) -> AnalysisFields {
    AnalysisFields {
      style_category: style.into(),
      kind: kind.into(),
      keywords: keywords.into(),
      ..Default::default()
    }
  }

  #[test]
  fn common_tags_always_close_the_list() {
    let out = enrich(&snapshot("not a url"), &AnalysisFields::default());
    assert_eq!(out, "design, ui, ux, inspiration, reference");
  }

  #[test]
  fn generator_keywords_come_first_and_are_deduplicated() {
    let out = enrich(
      &snapshot("https://example.com"),
      &fields("Clean Minimal", "Landing Page", " saas , ,design, saas"),
    );
    assert_eq!(
      out,
      "saas, design, Clean Minimal, minimalism, clean, Landing Page, \
       landing page, ui, ux, inspiration, reference"
    );
  }

  #[test]
  fn color_and_effect_tags() {
    let mut f = fields("Dark Mode", "Dashboard", "");
    f.primary_colors = "White #FFFFFF, slate grey, Blue".into();
    f.effects_animation = "nav: sticky blur header, hover lift".into();
    let out = enrich(&snapshot("https://example.com"), &f);
    for tag in [
      "white background",
      "white",
      "neutral",
      "grayscale",
      "blue accent",
      "glassmorphism",
      "frosted",
      "hover effects",
      "sticky header",
      "dashboard",
    ] {
      assert!(out.split(", ").any(|k| k == tag), "missing {tag:?} in {out}");
    }
    assert!(!out.contains("black"));
  }

  #[test]
  fn hostname_tags_ignore_leading_www() {
    let out = enrich(&snapshot("https://www.acme-bio.com/about"), &AnalysisFields::default());
    assert!(out.starts_with("biotech, science, healthcare, pharmaceutical"));

    let out = enrich(&snapshot("https://shop.example.com"), &AnalysisFields::default());
    assert!(out.starts_with("ecommerce, "));
  }
}
