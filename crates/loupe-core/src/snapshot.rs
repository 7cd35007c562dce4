//! Design snapshot: one immutable capture of a page's design signals.
//!
//! A snapshot is produced once per page by the extractor and never modified
//! afterwards. Field names serialise as camelCase so the JSON shape matches
//! what a browser content script posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Coarse perceptual bucket assigned to each retained color.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorCategory {
  BackgroundLight,
  TextDark,
  AccentWarm,
  AccentCool,
  AccentNature,
  Neutral,
}

/// A distinct color and how often it appeared across elements and properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
  /// Uppercase `#RRGGBB`.
  pub hex:      String,
  pub count:    u32,
  pub category: ColorCategory,
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Rgb {
  pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

  /// Parse a `#RRGGBB` string (case-insensitive).
  pub fn from_hex(hex: &str) -> Result<Self> {
    let digits = hex
      .strip_prefix('#')
      .filter(|d| d.len() == 6 && d.is_ascii())
      .ok_or_else(|| Error::InvalidHex(hex.to_owned()))?;
    let channel = |range: std::ops::Range<usize>| {
      u8::from_str_radix(&digits[range], 16)
        .map_err(|_| Error::InvalidHex(hex.to_owned()))
    };
    Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
  }

  /// Uppercase `#RRGGBB`.
  pub fn to_hex(self) -> String {
    format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
  }

  /// HSL lightness in `0.0..=1.0`.
  pub fn lightness(self) -> f64 {
    let max = self.r.max(self.g).max(self.b) as f64;
    let min = self.r.min(self.g).min(self.b) as f64;
    (max + min) / 2.0 / 255.0
  }

  /// Unweighted mean of the three channels.
  pub fn mean(self) -> f64 {
    (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
  }
}

// ─── Typography ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontUsage {
  pub font:  String,
  pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizeUsage {
  pub size:  String,
  pub count: u32,
}

/// Computed text metrics of the first heading at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStyle {
  /// `h1` through `h6`.
  pub tag:            String,
  pub font_family:    String,
  pub font_size:      String,
  pub font_weight:    String,
  pub line_height:    String,
  pub letter_spacing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
  pub fonts:          Vec<FontUsage>,
  pub font_sizes:     Vec<FontSizeUsage>,
  pub heading_styles: Vec<HeadingStyle>,
}

// ─── Layout ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
  /// Distinct container widths in px, largest first.
  pub container_widths: Vec<u32>,
  pub uses_flexbox:     bool,
  pub uses_grid:        bool,
  pub flex_count:       u32,
  pub grid_count:       u32,
  /// CSS length strings, e.g. `"16px"` or `"0px 24px"`.
  pub common_spacings:  Vec<String>,
}

// ─── Effects ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effects {
  pub shadows:       Vec<String>,
  pub border_radius: Vec<String>,
  pub gradients:     Vec<String>,
  /// Any element uses a backdrop filter.
  pub blur:          bool,
  pub animations:    Vec<String>,
  /// `"{transition-property} {transition-duration}"` pairs.
  pub transitions:   Vec<String>,
  /// Leading transform function names, e.g. `matrix`, `translateY`.
  pub transforms:    Vec<String>,
  /// Heuristic affordance tags such as `buttons(12)` or `modals`.
  pub interactions:  Vec<String>,
}

// ─── Style categories ────────────────────────────────────────────────────────

/// A heuristic style label assigned by the extractor's rule table.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum StyleCategory {
  #[serde(rename = "Glassmorphism")]
  #[strum(serialize = "Glassmorphism")]
  Glassmorphism,
  #[serde(rename = "Minimalism")]
  #[strum(serialize = "Minimalism")]
  Minimalism,
  #[serde(rename = "Bento Box Grid")]
  #[strum(serialize = "Bento Box Grid")]
  BentoBoxGrid,
  #[serde(rename = "Dark Mode")]
  #[strum(serialize = "Dark Mode")]
  DarkMode,
  #[serde(rename = "Neubrutalism")]
  #[strum(serialize = "Neubrutalism")]
  Neubrutalism,
  /// Sentinel emitted when no rule fires.
  #[serde(rename = "Modern/Custom")]
  #[strum(serialize = "Modern/Custom")]
  ModernCustom,
}

fn default_style_categories() -> Vec<StyleCategory> {
  vec![StyleCategory::ModernCustom]
}

/// An empty list reads as the sentinel, like a missing one.
fn non_empty_style_categories<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Vec<StyleCategory>, D::Error> {
  let categories = Vec::<StyleCategory>::deserialize(deserializer)?;
  if categories.is_empty() {
    return Ok(default_style_categories());
  }
  Ok(categories)
}

// ─── Page meta ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
  /// Content of `<meta name="viewport">`, or `"not set"`.
  pub viewport:    String,
  pub theme_color: Option<String>,
}

impl Default for PageMeta {
  fn default() -> Self {
    Self { viewport: "not set".to_owned(), theme_color: None }
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSnapshot {
  pub url:              String,
  #[serde(default)]
  pub title:            String,
  #[serde(default = "Utc::now")]
  pub timestamp:        DateTime<Utc>,
  /// At most 20 entries, most frequent first. Never pure black or white.
  #[serde(default)]
  pub colors:           Vec<ColorSwatch>,
  #[serde(default)]
  pub typography:       Typography,
  #[serde(default)]
  pub layout:           Layout,
  #[serde(default)]
  pub effects:          Effects,
  /// Never empty.
  #[serde(
    default = "default_style_categories",
    deserialize_with = "non_empty_style_categories"
  )]
  pub style_categories: Vec<StyleCategory>,
  #[serde(default)]
  pub meta:             PageMeta,
}

impl DesignSnapshot {
  /// The first heuristic label, or the sentinel if the list is empty.
  pub fn primary_style(&self) -> StyleCategory {
    self
      .style_categories
      .first()
      .copied()
      .unwrap_or(StyleCategory::ModernCustom)
  }

  /// Hex values of the `n` most frequent colors.
  pub fn top_hex(&self, n: usize) -> Vec<&str> {
    self.colors.iter().take(n).map(|c| c.hex.as_str()).collect()
  }

  /// Style labels joined with `", "`.
  pub fn style_list(&self) -> String {
    self
      .style_categories
      .iter()
      .map(|c| <&'static str>::from(*c))
      .collect::<Vec<_>>()
      .join(", ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rgb_hex_parsing_is_case_insensitive() {
    let rgb = Rgb::from_hex("#abC123").unwrap();
    assert_eq!(rgb, Rgb::new(0xAB, 0xC1, 0x23));
    assert_eq!(rgb.to_hex(), "#ABC123");
  }

  #[test]
  fn rgb_rejects_short_and_garbage_hex() {
    assert!(Rgb::from_hex("#FFF").is_err());
    assert!(Rgb::from_hex("123456").is_err());
    assert!(Rgb::from_hex("#GGGGGG").is_err());
  }

  #[test]
  fn lightness_spans_black_to_white() {
    assert_eq!(Rgb::new(0, 0, 0).lightness(), 0.0);
    assert_eq!(Rgb::new(255, 255, 255).lightness(), 1.0);
  }

  #[test]
  fn snapshot_uses_camel_case_and_fills_defaults() {
    let json = r##"{
      "url": "https://example.com",
      "timestamp": "2024-05-01T12:00:00Z",
      "colors": [{ "hex": "#3366FF", "count": 4, "category": "accent-cool" }],
      "layout": { "usesGrid": true, "gridCount": 7 },
      "styleCategories": ["Bento Box Grid", "Dark Mode"]
    }"##;
    let snap: DesignSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snap.colors[0].category, ColorCategory::AccentCool);
    assert!(snap.layout.uses_grid);
    assert_eq!(snap.layout.grid_count, 7);
    assert_eq!(snap.primary_style(), StyleCategory::BentoBoxGrid);
    assert_eq!(snap.style_list(), "Bento Box Grid, Dark Mode");
    assert_eq!(snap.meta.viewport, "not set");
    assert!(snap.typography.fonts.is_empty());
  }

  #[test]
  fn missing_style_categories_default_to_sentinel() {
    let snap: DesignSnapshot =
      serde_json::from_str(r#"{ "url": "https://a.test" }"#).unwrap();
    assert_eq!(snap.style_categories, vec![StyleCategory::ModernCustom]);
  }

  #[test]
  fn empty_style_categories_become_sentinel() {
    let snap: DesignSnapshot =
      serde_json::from_str(r#"{ "url": "https://a.test", "styleCategories": [] }"#).unwrap();
    assert_eq!(snap.style_categories, vec![StyleCategory::ModernCustom]);
    assert_eq!(snap.style_list(), "Modern/Custom");
  }

  #[test]
  fn style_category_display_matches_wire_name() {
    assert_eq!(StyleCategory::ModernCustom.to_string(), "Modern/Custom");
    assert_eq!(
      serde_json::to_string(&StyleCategory::BentoBoxGrid).unwrap(),
      "\"Bento Box Grid\""
    );
  }
}
