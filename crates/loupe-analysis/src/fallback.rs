//! Deterministic field values derived from the snapshot alone.

use loupe_core::{analysis::AnalysisField, snapshot::DesignSnapshot};

/// Number of top colors used for the primary-colors fallback.
const PRIMARY_COLOR_COUNT: usize = 3;

/// The value substituted for `field` when the generator supplied none.
pub fn fallback(snapshot: &DesignSnapshot, field: AnalysisField) -> String {
  match field {
    AnalysisField::StyleCategory => snapshot.primary_style().to_string(),
    AnalysisField::Type => "General".into(),
    AnalysisField::Keywords => snapshot.style_list(),
    AnalysisField::PrimaryColors => snapshot.top_hex(PRIMARY_COLOR_COUNT).join(", "),
    AnalysisField::EffectsAnimation => effects_summary(snapshot),
    AnalysisField::LightMode | AnalysisField::DarkMode => "?".into(),
    AnalysisField::Performance | AnalysisField::MobileFriendly => "Good".into(),
    AnalysisField::Accessibility => "Needs review".into(),
    AnalysisField::FrameworkCompat => "Tailwind 9/10".into(),
    AnalysisField::Complexity => "Medium".into(),
    AnalysisField::SecondaryColors
    | AnalysisField::BestFor
    | AnalysisField::DoNotUseFor
    | AnalysisField::Notes => String::new(),
  }
}

fn effects_summary(snapshot: &DesignSnapshot) -> String {
  let fx = &snapshot.effects;
  let flags = [
    (fx.blur, "backdrop-blur"),
    (!fx.gradients.is_empty(), "gradients"),
    (!fx.animations.is_empty(), "animations"),
  ];
  let present: Vec<_> = flags.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
  if present.is_empty() { "minimal".into() } else { present.join(", ") }
}

#[cfg(test)]
mod tests {
  use loupe_core::snapshot::StyleCategory;
  use serde_json::json;

  use super::*;

  fn snapshot(value: serde_json::Value) -> DesignSnapshot {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn bare_snapshot_falls_back_to_constants() {
    let snap = snapshot(json!({ "url": "https://a.test", "styleCategories": ["Minimalism"] }));
    assert_eq!(fallback(&snap, AnalysisField::StyleCategory), "Minimalism");
    assert_eq!(fallback(&snap, AnalysisField::Type), "General");
    assert_eq!(fallback(&snap, AnalysisField::PrimaryColors), "");
    assert_eq!(fallback(&snap, AnalysisField::EffectsAnimation), "minimal");
    assert_eq!(fallback(&snap, AnalysisField::DarkMode), "?");
    assert_eq!(fallback(&snap, AnalysisField::Accessibility), "Needs review");
    assert_eq!(fallback(&snap, AnalysisField::FrameworkCompat), "Tailwind 9/10");
    assert_eq!(fallback(&snap, AnalysisField::Notes), "");
  }

  #[test]
  fn derived_fallbacks_read_the_snapshot() {
    let snap = snapshot(json!({
      "url": "https://a.test",
      "colors": [
        { "hex": "#111111", "count": 9, "category": "text-dark" },
        { "hex": "#3366FF", "count": 5, "category": "accent-cool" },
        { "hex": "#E11D48", "count": 2, "category": "accent-warm" },
        { "hex": "#F5F5F5", "count": 1, "category": "background-light" }
      ],
      "effects": { "blur": true, "animations": ["fadeIn"] },
      "styleCategories": ["Dark Mode", "Glassmorphism"]
    }));
    assert_eq!(snap.primary_style(), StyleCategory::DarkMode);
    assert_eq!(fallback(&snap, AnalysisField::StyleCategory), "Dark Mode");
    assert_eq!(fallback(&snap, AnalysisField::Keywords), "Dark Mode, Glassmorphism");
    assert_eq!(
      fallback(&snap, AnalysisField::PrimaryColors),
      "#111111, #3366FF, #E11D48"
    );
    assert_eq!(
      fallback(&snap, AnalysisField::EffectsAnimation),
      "backdrop-blur, animations"
    );
  }
}
