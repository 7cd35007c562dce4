//! Typography extraction: font family and size frequencies over text-bearing
//! elements, plus the metrics of the first heading at each level.

use loupe_core::snapshot::{FontSizeUsage, FontUsage, HeadingStyle, Typography};

use crate::{page::PageElement, tally::Tally};

/// Tags whose computed font is tallied.
pub const TEXT_TAGS: [&str; 15] = [
  "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "a", "button", "li", "td",
  "th", "label", "input",
];

pub const MAX_FONTS: usize = 5;
pub const MAX_FONT_SIZES: usize = 10;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// The first family of a `font-family` list, unquoted.
pub fn primary_family(font_family: &str) -> String {
  font_family
    .split(',')
    .next()
    .unwrap_or_default()
    .replace(['"', '\''], "")
    .trim()
    .to_owned()
}

pub fn extract_typography(elements: &[PageElement]) -> Typography {
  let mut fonts = Tally::new();
  let mut sizes = Tally::new();

  for el in elements.iter().filter(|el| TEXT_TAGS.iter().any(|t| el.is(t))) {
    if let Some(family) = el.style("font-family") {
      let family = primary_family(family);
      if !family.is_empty() {
        fonts.add(family);
      }
    }
    if let Some(size) = el.style("font-size") {
      sizes.add(size.to_owned());
    }
  }

  let heading_styles = HEADING_TAGS
    .iter()
    .filter_map(|tag| elements.iter().find(|el| el.is(tag)).map(|el| (tag, el)))
    .map(|(tag, el)| {
      let read = |prop: &str| el.style(prop).unwrap_or_default().to_owned();
      HeadingStyle {
        tag:            (*tag).to_owned(),
        font_family:    primary_family(&read("font-family")),
        font_size:      read("font-size"),
        font_weight:    read("font-weight"),
        line_height:    read("line-height"),
        letter_spacing: read("letter-spacing"),
      }
    })
    .collect();

  Typography {
    fonts: fonts
      .ranked(MAX_FONTS)
      .into_iter()
      .map(|(font, count)| FontUsage { font, count })
      .collect(),
    font_sizes: sizes
      .ranked(MAX_FONT_SIZES)
      .into_iter()
      .map(|(size, count)| FontSizeUsage { size, count })
      .collect(),
    heading_styles,
  }
}
