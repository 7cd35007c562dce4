//! Analysis normaliser for Loupe.
//!
//! Merges a generator response with deterministic fallbacks into a complete
//! [`AnalysisFields`], and builds the prompt that asks for that response.
//! Pure synchronous; no I/O.
//!
//! ```no_run
//! # let snapshot: loupe_core::snapshot::DesignSnapshot = todo!();
//! let prompt = loupe_analysis::build_prompt(&snapshot);
//! // … send `prompt` to a generator …
//! let fields = loupe_analysis::normalize(&snapshot, Some("TYPE: Dashboard"));
//! assert_eq!(fields.kind, "Dashboard");
//! ```

pub mod fallback;
pub mod keywords;
pub mod labels;
mod prompt;

use loupe_core::{
  analysis::{AnalysisField, AnalysisFields},
  snapshot::DesignSnapshot,
};
use strum::IntoEnumIterator;

pub use labels::{LabeledText, Lookup};
pub use prompt::build_prompt;

/// Resolve every field of `snapshot`'s analysis.
///
/// Each field takes the labeled value from `text` when present and non-empty,
/// otherwise its [`fallback`](fallback::fallback). The keywords field is then
/// replaced by its [enriched](keywords::enrich) form.
pub fn normalize(snapshot: &DesignSnapshot, text: Option<&str>) -> AnalysisFields {
  let parsed = text.map(LabeledText::parse).unwrap_or_default();

  let mut fields = AnalysisFields::default();
  for field in AnalysisField::iter() {
    let value = match parsed.lookup(field).value() {
      Some(v) => v.to_owned(),
      None => fallback::fallback(snapshot, field),
    };
    fields.set(field, value);
  }
  fields.keywords = keywords::enrich(snapshot, &fields);

  tracing::debug!(
    url = %snapshot.url,
    labeled = parsed.len(),
    style = %fields.style_category,
    "normalised analysis"
  );
  fields
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn snapshot() -> DesignSnapshot {
    serde_json::from_value(json!({
      "url": "https://www.nimbus.app/pricing",
      "colors": [{ "hex": "#3366FF", "count": 6, "category": "accent-cool" }],
      "effects": { "gradients": ["linear-gradient(#fff, #eee)"] },
      "styleCategories": ["Minimalism"]
    }))
    .unwrap()
  }

  #[test]
  fn no_text_falls_back_everywhere() {
    let fields = normalize(&snapshot(), None);
    assert_eq!(fields.style_category, "Minimalism");
    assert_eq!(fields.kind, "General");
    assert_eq!(fields.primary_colors, "#3366FF");
    assert_eq!(fields.effects_animation, "gradients");
    assert_eq!(fields.performance, "Good");
    assert_eq!(fields.complexity, "Medium");
    assert_eq!(
      fields.keywords,
      "Minimalism, minimalism, General, gradient, saas, design, ui, ux, inspiration, reference"
    );
  }

  #[test]
  fn labeled_values_override_fallbacks_and_empty_labels_do_not() {
    let text = "\
STYLE_CATEGORY: Clean SaaS
TYPE: Landing Page
KEYWORDS: pricing, cards
SECONDARY_COLORS: #F59E0B
DARK_MODE:
COMPLEXITY: Low";
    let fields = normalize(&snapshot(), Some(text));
    assert_eq!(fields.style_category, "Clean SaaS");
    assert_eq!(fields.kind, "Landing Page");
    assert_eq!(fields.secondary_colors, "#F59E0B");
    assert_eq!(fields.dark_mode, "?");
    assert_eq!(fields.complexity, "Low");
    assert_eq!(fields.primary_colors, "#3366FF");
    assert!(fields.keywords.starts_with("pricing, cards, Clean SaaS, clean, Landing Page, landing page"));
    assert!(fields.keywords.ends_with("design, ui, ux, inspiration, reference"));
  }

  #[test]
  fn unlabeled_text_is_treated_as_no_text() {
    assert_eq!(
      normalize(&snapshot(), Some("Sorry, I can't help with that.")),
      normalize(&snapshot(), None)
    );
  }
}
