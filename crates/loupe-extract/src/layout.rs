//! Layout extraction: container widths, flex/grid usage and spacing values.

use loupe_core::snapshot::Layout;

use crate::{page::PageElement, tally::push_distinct};

pub const MAX_CONTAINER_WIDTHS: usize = 5;
pub const MAX_SPACINGS: usize = 10;

/// Widths at or below this are not considered layout containers.
const MIN_CONTAINER_WIDTH: u32 = 100;

const SPACING_TAGS: [&str; 3] = ["section", "div", "article"];
const SPACING_PROPERTIES: [&str; 3] = ["padding", "margin", "gap"];

/// `[class*="container"], [class*="wrapper"], main, article`
fn is_container(el: &PageElement) -> bool {
  el.class_contains("container")
    || el.class_contains("wrapper")
    || el.is("main")
    || el.is("article")
}

/// `[style*="<kind>"], [class*="<kind>"]`
fn references(el: &PageElement, kind: &str) -> bool {
  el.class_contains(kind) || el.attr("style").is_some_and(|s| s.contains(kind))
}

/// A spacing value worth recording: a length list that is not all zeros.
fn is_meaningful_spacing(value: &str) -> bool {
  if matches!(value, "normal" | "auto" | "initial" | "inherit") {
    return false;
  }
  !value.split_whitespace().all(is_zero_length)
}

pub(crate) fn is_zero_length(token: &str) -> bool {
  let number = token.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
  !number.is_empty() && number.parse::<f64>().is_ok_and(|n| n == 0.0)
}

pub fn extract_layout(elements: &[PageElement]) -> Layout {
  let mut container_widths: Vec<u32> = Vec::new();
  let mut common_spacings = Vec::new();
  let mut flex_count = 0u32;
  let mut grid_count = 0u32;

  for el in elements {
    if is_container(el)
      && let Some(w) = el.width
      && w > MIN_CONTAINER_WIDTH
      && !container_widths.contains(&w)
    {
      container_widths.push(w);
    }

    if references(el, "flex") {
      flex_count += 1;
    }
    if references(el, "grid") {
      grid_count += 1;
    }

    if SPACING_TAGS.iter().any(|t| el.is(t)) {
      for prop in SPACING_PROPERTIES {
        if let Some(value) = el.style(prop)
          && is_meaningful_spacing(value)
        {
          push_distinct(&mut common_spacings, value, MAX_SPACINGS);
        }
      }
    }
  }

  container_widths.sort_unstable_by(|a, b| b.cmp(a));
  container_widths.truncate(MAX_CONTAINER_WIDTHS);

  Layout {
    container_widths,
    uses_flexbox: flex_count > 0,
    uses_grid: grid_count > 0,
    flex_count,
    grid_count,
    common_spacings,
  }
}
