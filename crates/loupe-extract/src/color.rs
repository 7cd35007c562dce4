//! Color extraction: tally color-bearing properties, normalise to hex, and
//! bucket each retained color.

use std::sync::LazyLock;

use loupe_core::{
  Result,
  snapshot::{ColorCategory, ColorSwatch, Rgb},
};
use regex::Regex;

use crate::{page::PageElement, tally::Tally};

/// Computed-style properties that carry a color.
pub const COLOR_PROPERTIES: [&str; 9] = [
  "background-color",
  "color",
  "border-color",
  "border-top-color",
  "border-bottom-color",
  "border-left-color",
  "border-right-color",
  "outline-color",
  "box-shadow",
];

/// Colors kept per snapshot.
pub const MAX_COLORS: usize = 20;

const BLACK: &str = "#000000";
const WHITE: &str = "#FFFFFF";

static RGB_FN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"rgba?\(\s*(\d+)\s*[,\s]\s*(\d+)\s*[,\s]\s*(\d+)\s*(?:[,/]\s*([\d.]+)\s*(%)?)?",
  )
  .expect("static regex")
});

/// Swatches plus whether any surface or text color was partly transparent
/// (alpha strictly between zero and one).
#[derive(Debug, Default)]
pub struct ColorTally {
  pub swatches:    Vec<ColorSwatch>,
  pub translucent: bool,
}

/// Convert a CSS color value to uppercase `#RRGGBB`.
///
/// Hex values pass through uppercased (`#abc` is expanded, an alpha pair is
/// dropped). For `rgb()`/`rgba()` the first three channels are read and alpha
/// is ignored. Anything else yields `None`.
pub fn rgb_to_hex(value: &str) -> Option<String> {
  let value = value.trim();
  if let Some(digits) = value.strip_prefix('#') {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
      return None;
    }
    let six = match digits.len() {
      3 | 4 => digits.chars().take(3).flat_map(|c| [c, c]).collect::<String>(),
      6 | 8 => digits[..6].to_owned(),
      _ => return None,
    };
    return Some(format!("#{}", six.to_ascii_uppercase()));
  }

  let caps = RGB_FN.captures(value)?;
  let channel = |i: usize| -> u8 {
    caps[i].parse::<u32>().map(|v| v.min(255) as u8).unwrap_or(u8::MAX)
  };
  Some(Rgb::new(channel(1), channel(2), channel(3)).to_hex())
}

/// Alpha of a color value in `0.0..=1.0`, or `None` when it is opaque by
/// construction (no alpha component) or unparseable.
pub fn alpha(value: &str) -> Option<f64> {
  let value = value.trim();
  if let Some(digits) = value.strip_prefix('#') {
    let pair = match digits.len() {
      4 => digits[3..4].repeat(2),
      8 => digits[6..8].to_owned(),
      _ => return None,
    };
    return u8::from_str_radix(&pair, 16).ok().map(|a| a as f64 / 255.0);
  }
  let caps = RGB_FN.captures(value)?;
  let raw: f64 = caps.get(4)?.as_str().parse().ok()?;
  Some(if caps.get(5).is_some() { raw / 100.0 } else { raw })
}

/// `transparent` or fully transparent black, ignoring whitespace.
pub fn is_transparent(value: &str) -> bool {
  let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
  compact.eq_ignore_ascii_case("transparent") || compact == "rgba(0,0,0,0)"
}

/// Bucket a color by HSL lightness, then by its strictly dominant channel.
pub fn categorize(rgb: Rgb) -> ColorCategory {
  let l = rgb.lightness();
  let Rgb { r, g, b } = rgb;
  if l > 0.9 {
    ColorCategory::BackgroundLight
  } else if l < 0.1 {
    ColorCategory::TextDark
  } else if r > g && r > b {
    ColorCategory::AccentWarm
  } else if b > r && b > g {
    ColorCategory::AccentCool
  } else if g > r && g > b {
    ColorCategory::AccentNature
  } else {
    ColorCategory::Neutral
  }
}

/// [`categorize`] for a `#RRGGBB` string.
pub fn categorize_color(hex: &str) -> Result<ColorCategory> {
  Ok(categorize(Rgb::from_hex(hex)?))
}

/// Tally every color-bearing property of every element.
pub fn extract_colors(elements: &[PageElement]) -> ColorTally {
  let mut tally = Tally::new();
  let mut translucent = false;

  for el in elements {
    for prop in COLOR_PROPERTIES {
      let Some(value) = el.style(prop) else { continue };
      if is_transparent(value) {
        continue;
      }
      let Some(hex) = rgb_to_hex(value) else { continue };
      // Shadows are soft by nature and say nothing about translucent surfaces.
      if prop != "box-shadow" && alpha(value).is_some_and(|a| a > 0.0 && a < 1.0) {
        translucent = true;
      }
      if hex != BLACK && hex != WHITE {
        tally.add(hex);
      }
    }
  }

  let swatches = tally
    .ranked(MAX_COLORS)
    .into_iter()
    .filter_map(|(hex, count)| {
      let category = categorize_color(&hex).ok()?;
      Some(ColorSwatch { hex, count, category })
    })
    .collect();

  ColorTally { swatches, translucent }
}
