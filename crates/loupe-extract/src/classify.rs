//! Style categorisation as an ordered rule table.
//!
//! Rules are evaluated in sequence and are not mutually exclusive: every rule
//! whose predicate holds contributes its label. When none holds the snapshot
//! gets the single [`StyleCategory::ModernCustom`] label.

use loupe_core::snapshot::{ColorSwatch, Effects, Layout, Rgb, StyleCategory};

use crate::layout::is_zero_length;

/// Everything the rules look at.
pub struct Signals<'a> {
  pub colors:      &'a [ColorSwatch],
  /// Some accepted color value carried alpha below one.
  pub translucent: bool,
  pub effects:     &'a Effects,
  pub layout:      &'a Layout,
}

pub struct StyleRule {
  pub label:   StyleCategory,
  pub applies: fn(&Signals<'_>) -> bool,
}

/// Hex values that read as "primary" for Neubrutalism.
const PRIMARY_HEXES: [&str; 4] = ["#FF0000", "#0000FF", "#FFFF00", "#FF00FF"];

/// Mean channel value below which a color reads as a dark background.
const DARK_MEAN: f64 = 50.0;
/// A dark color must appear more often than this to count as a background.
const DARK_MIN_COUNT: u32 = 5;

pub const STYLE_RULES: &[StyleRule] = &[
  StyleRule {
    label:   StyleCategory::Glassmorphism,
    applies: |s| s.effects.blur && s.translucent,
  },
  StyleRule {
    label:   StyleCategory::Minimalism,
    applies: |s| s.colors.len() < 6 && s.effects.shadows.len() < 2,
  },
  StyleRule {
    label:   StyleCategory::BentoBoxGrid,
    applies: |s| s.layout.uses_grid && s.layout.grid_count > 3,
  },
  StyleRule {
    label:   StyleCategory::DarkMode,
    applies: |s| {
      s.colors.iter().any(|c| {
        c.count > DARK_MIN_COUNT
          && Rgb::from_hex(&c.hex).is_ok_and(|rgb| rgb.mean() < DARK_MEAN)
      })
    },
  },
  StyleRule {
    label:   StyleCategory::Neubrutalism,
    applies: |s| {
      s.effects.shadows.iter().any(|sh| has_zero_pair(sh))
        && s.colors.iter().any(|c| PRIMARY_HEXES.contains(&c.hex.as_str()))
    },
  },
];

/// Labels of every rule that applies, in table order; never empty.
pub fn classify(signals: &Signals<'_>) -> Vec<StyleCategory> {
  let labels: Vec<_> = STYLE_RULES
    .iter()
    .filter(|rule| (rule.applies)(signals))
    .map(|rule| rule.label)
    .collect();
  if labels.is_empty() { vec![StyleCategory::ModernCustom] } else { labels }
}

/// A hard shadow: two consecutive zero lengths (`0 0 0 2px`, or
/// `4px 4px 0px 0px`). Color functions are skipped so `rgb(0, 0, 0)` does
/// not count.
fn has_zero_pair(shadow: &str) -> bool {
  let mut outside = String::with_capacity(shadow.len());
  let mut depth = 0u32;
  for c in shadow.chars() {
    match c {
      '(' => depth += 1,
      ')' => {
        depth = depth.saturating_sub(1);
        outside.push(' ');
      }
      _ if depth == 0 => outside.push(if c == ',' { ' ' } else { c }),
      _ => {}
    }
  }
  let tokens: Vec<_> = outside.split_whitespace().collect();
  tokens
    .windows(2)
    .any(|w| is_zero_length(w[0]) && is_zero_length(w[1]))
}

#[cfg(test)]
mod tests {
  use loupe_core::snapshot::ColorCategory;

  use super::*;

  fn swatch(hex: &str, count: u32) -> ColorSwatch {
    ColorSwatch { hex: hex.into(), count, category: ColorCategory::Neutral }
  }

  fn classify_with(
    colors: &[ColorSwatch],
    translucent: bool,
    effects: &Effects,
    layout: &Layout,
  ) -> Vec<StyleCategory> {
    classify(&Signals { colors, translucent, effects, layout })
  }

  fn many_colors() -> Vec<ColorSwatch> {
    (0..8).map(|i| swatch(&format!("#8080{i:02X}"), 1)).collect()
  }

  fn two_shadows() -> Effects {
    Effects {
      shadows: vec!["0px 1px 2px red".into(), "0px 4px 8px red".into()],
      ..Default::default()
    }
  }

  #[test]
  fn zero_colors_and_shadows_is_minimalism() {
    let cats = classify_with(&[], false, &Effects::default(), &Layout::default());
    assert_eq!(cats, vec![StyleCategory::Minimalism]);
  }

  #[test]
  fn nothing_applies_gives_sentinel() {
    let cats = classify_with(&many_colors(), false, &two_shadows(), &Layout::default());
    assert_eq!(cats, vec![StyleCategory::ModernCustom]);
  }

  #[test]
  fn glassmorphism_needs_blur_and_translucency() {
    let blur = Effects { blur: true, ..two_shadows() };
    let with = classify_with(&many_colors(), true, &blur, &Layout::default());
    let without = classify_with(&many_colors(), false, &blur, &Layout::default());
    assert_eq!(with, vec![StyleCategory::Glassmorphism]);
    assert_eq!(without, vec![StyleCategory::ModernCustom]);
  }

  #[test]
  fn bento_needs_more_than_three_grid_elements() {
    let layout = |grid_count| Layout { uses_grid: true, grid_count, ..Default::default() };
    assert!(
      classify_with(&many_colors(), false, &two_shadows(), &layout(4))
        .contains(&StyleCategory::BentoBoxGrid)
    );
    assert!(
      !classify_with(&many_colors(), false, &two_shadows(), &layout(3))
        .contains(&StyleCategory::BentoBoxGrid)
    );
  }

  #[test]
  fn dark_mode_needs_a_frequent_dark_color() {
    let mut colors = many_colors();
    colors.insert(0, swatch("#111827", 6));
    let cats = classify_with(&colors, false, &two_shadows(), &Layout::default());
    assert_eq!(cats, vec![StyleCategory::DarkMode]);

    colors[0].count = 5;
    let cats = classify_with(&colors, false, &two_shadows(), &Layout::default());
    assert_eq!(cats, vec![StyleCategory::ModernCustom]);
  }

  #[test]
  fn neubrutalism_needs_hard_shadow_and_primary_color() {
    let mut colors = many_colors();
    colors.push(swatch("#FFFF00", 2));
    let effects = Effects {
      shadows: vec![
        "rgb(0, 0, 0) 4px 4px 0px 0px".into(),
        "0px 1px 2px red".into(),
      ],
      ..Default::default()
    };
    let cats = classify_with(&colors, false, &effects, &Layout::default());
    assert_eq!(cats, vec![StyleCategory::Neubrutalism]);

    let cats = classify_with(&many_colors(), false, &effects, &Layout::default());
    assert_eq!(cats, vec![StyleCategory::ModernCustom]);
  }

  #[test]
  fn rules_are_not_exclusive_and_keep_table_order() {
    let effects = Effects {
      blur: true,
      shadows: vec!["0 0 0 3px #000".into()],
      ..Default::default()
    };
    let layout = Layout { uses_grid: true, grid_count: 9, ..Default::default() };
    let colors = vec![swatch("#0A0A0A", 40), swatch("#FF00FF", 3)];
    let cats = classify_with(&colors, true, &effects, &layout);
    assert_eq!(cats, vec![
      StyleCategory::Glassmorphism,
      StyleCategory::Minimalism,
      StyleCategory::BentoBoxGrid,
      StyleCategory::DarkMode,
      StyleCategory::Neubrutalism,
    ]);
  }

  #[test]
  fn zero_pair_ignores_color_functions() {
    assert!(!has_zero_pair("rgba(0, 0, 0, 0.1) 0px 1px 3px 0px"));
    assert!(has_zero_pair("0 0 10px rgba(0,0,0,.5)"));
    assert!(has_zero_pair("rgb(0, 0, 0) 4px 4px 0px 0px"));
  }
}
