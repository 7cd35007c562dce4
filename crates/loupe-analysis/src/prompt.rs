//! The analysis prompt sent to the text generator.

use std::fmt::Write as _;

use loupe_core::{analysis::AnalysisField, snapshot::DesignSnapshot};
use strum::IntoEnumIterator;

/// Colors listed in the prompt.
const PROMPT_COLORS: usize = 8;
/// Animations and transitions listed in the motion summary.
const PROMPT_MOTION: usize = 3;

/// Instruction shown after each output label.
fn hint(field: AnalysisField) -> &'static str {
  match field {
    AnalysisField::StyleCategory => r#"[e.g., "Dark Mode SaaS", "Glassmorphism Dashboard"]"#,
    AnalysisField::Type => "[General, Landing Page, Dashboard, E-commerce, Portfolio]",
    AnalysisField::Keywords => "[8-12 keywords]",
    AnalysisField::PrimaryColors => "[2-3 main colors with hex]",
    AnalysisField::SecondaryColors => "[1-2 accent colors with hex]",
    AnalysisField::EffectsAnimation => {
      "[DETAILED UX: button hover (scale/shadow/color), card interactions, \
       scroll-triggered animations, page transitions, loading states, \
       micro-interactions. Be specific: \"buttons: scale 1.05 + lift shadow\", \
       \"cards: stagger fade-in on scroll\", \"nav: sticky blur header\"]"
    }
    AnalysisField::BestFor => "[3-5 use cases]",
    AnalysisField::DoNotUseFor => "[2-3 anti-cases]",
    AnalysisField::LightMode | AnalysisField::DarkMode => "[Full, Partial, No]",
    AnalysisField::Performance => "[Excellent, Good, Moderate, Poor]",
    AnalysisField::Accessibility => "[WCAG AAA, WCAG AA, Low contrast, Needs review]",
    AnalysisField::MobileFriendly => "[High, Good, Medium, Low]",
    AnalysisField::FrameworkCompat => r#"[e.g., "Tailwind 10/10, React 9/10"]"#,
    AnalysisField::Complexity => "[Low, Medium, High]",
    AnalysisField::Notes => "[1 sentence focusing on unique UX/interaction pattern]",
  }
}

fn visual_summary(snapshot: &DesignSnapshot) -> String {
  let fx = &snapshot.effects;
  let mut parts = Vec::new();
  if fx.blur {
    parts.push("backdrop-blur/glassmorphism".to_owned());
  }
  if !fx.gradients.is_empty() {
    parts.push(format!("gradients({})", fx.gradients.len()));
  }
  if !fx.shadows.is_empty() {
    parts.push("box-shadows".to_owned());
  }
  if let Some(radius) = fx.border_radius.first() {
    parts.push(format!("rounded({radius})"));
  }
  if parts.is_empty() { "minimal".to_owned() } else { parts.join(", ") }
}

fn motion_summary(snapshot: &DesignSnapshot) -> String {
  let fx = &snapshot.effects;
  let first = |v: &[String], sep: &str| {
    v.iter().take(PROMPT_MOTION).cloned().collect::<Vec<_>>().join(sep)
  };
  let mut parts = Vec::new();
  if !fx.animations.is_empty() {
    parts.push(format!("animations: {}", first(fx.animations.as_slice(), ", ")));
  }
  if !fx.transitions.is_empty() {
    parts.push(format!("transitions: {}", first(fx.transitions.as_slice(), "; ")));
  }
  if !fx.transforms.is_empty() {
    parts.push(format!("transforms: {}", fx.transforms.join(", ")));
  }
  if parts.is_empty() { "minimal transitions".to_owned() } else { parts.join(" | ") }
}

fn layout_summary(snapshot: &DesignSnapshot) -> String {
  let layout = &snapshot.layout;
  [(layout.uses_grid, "Grid"), (layout.uses_flexbox, "Flexbox")]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Build the prompt for `snapshot`.
pub fn build_prompt(snapshot: &DesignSnapshot) -> String {
  let fonts = snapshot
    .typography
    .fonts
    .iter()
    .map(|f| f.font.as_str())
    .collect::<Vec<_>>()
    .join(", ");
  let interactions = if snapshot.effects.interactions.is_empty() {
    "basic".to_owned()
  } else {
    snapshot.effects.interactions.join(", ")
  };

  let mut prompt = String::from(
    "Analyze this webpage design with focus on UX interactions and motion. \
     Output EXACTLY in this format:\n\n",
  );
  // Writing to a String cannot fail.
  let _ = writeln!(prompt, "URL: {}", snapshot.url);
  let _ = writeln!(prompt, "Title: {}", snapshot.title);
  let _ = writeln!(prompt, "Colors: {}", snapshot.top_hex(PROMPT_COLORS).join(", "));
  let _ = writeln!(prompt, "Fonts: {fonts}");
  let _ = writeln!(prompt, "Visual: {}", visual_summary(snapshot));
  let _ = writeln!(prompt, "Motion: {}", motion_summary(snapshot));
  let _ = writeln!(prompt, "Interactions: {interactions}");
  let _ = writeln!(prompt, "Layout: {}", layout_summary(snapshot));
  prompt.push_str("\n---OUTPUT (one line each, no markdown):---\n");
  for field in AnalysisField::iter() {
    let _ = writeln!(prompt, "{}: {}", field.label(), hint(field));
  }
  prompt
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::labels::{LabeledText, Lookup};

  fn snapshot(value: serde_json::Value) -> DesignSnapshot {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn bare_snapshot_uses_placeholders() {
    let prompt = build_prompt(&snapshot(json!({ "url": "https://a.test", "title": "A" })));
    assert!(prompt.contains("URL: https://a.test\n"));
    assert!(prompt.contains("Title: A\n"));
    assert!(prompt.contains("Visual: minimal\n"));
    assert!(prompt.contains("Motion: minimal transitions\n"));
    assert!(prompt.contains("Interactions: basic\n"));
  }

  #[test]
  fn summaries_reflect_effects_and_layout() {
    let prompt = build_prompt(&snapshot(json!({
      "url": "https://a.test",
      "typography": { "fonts": [{ "font": "Inter", "count": 3 }, { "font": "Georgia", "count": 1 }] },
      "layout": { "usesGrid": true, "usesFlexbox": true },
      "effects": {
        "blur": true,
        "gradients": ["linear-gradient(red, blue)"],
        "borderRadius": ["12px", "4px"],
        "animations": ["a", "b", "c", "d"],
        "transitions": ["color 0.2s", "opacity 0.3s"],
        "transforms": ["translateY"],
        "interactions": ["buttons(4)", "modals"]
      }
    })));
    assert!(prompt.contains("Fonts: Inter, Georgia\n"));
    assert!(prompt.contains("Visual: backdrop-blur/glassmorphism, gradients(1), rounded(12px)\n"));
    assert!(prompt.contains(
      "Motion: animations: a, b, c | transitions: color 0.2s; opacity 0.3s | transforms: translateY\n"
    ));
    assert!(prompt.contains("Interactions: buttons(4), modals\n"));
    assert!(prompt.contains("Layout: Grid Flexbox\n"));
  }

  #[test]
  fn every_output_label_is_requested() {
    let prompt = build_prompt(&snapshot(json!({ "url": "https://a.test" })));
    let output = prompt.split("---OUTPUT").nth(1).unwrap();
    let parsed = LabeledText::parse(output);
    for field in AnalysisField::iter() {
      assert!(matches!(parsed.lookup(field), Lookup::Value(_)), "{field:?} not requested");
    }
  }
}
