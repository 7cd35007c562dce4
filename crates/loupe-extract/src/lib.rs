//! Design-signal extraction for Loupe.
//!
//! Turns a [`Page`] dump (elements with computed style) into a
//! [`DesignSnapshot`]. Pure synchronous; never fails for a page dump, and
//! never mutates it.
//!
//! Pipeline:
//!   Page
//!     ├─ color::extract_colors()          → swatches + translucency
//!     ├─ typography::extract_typography()
//!     ├─ layout::extract_layout()
//!     ├─ effects::extract_effects()
//!     └─ classify::classify()             → style categories
//!
//! ```no_run
//! use loupe_extract::{Page, extract};
//!
//! let page = Page::from_html("https://example.com", "<html>…</html>");
//! let snapshot = extract(&page);
//! println!("{} colors", snapshot.colors.len());
//! ```

pub mod classify;
pub mod color;
pub mod effects;
mod html;
pub mod layout;
pub mod page;
mod tally;
pub mod typography;

use chrono::{DateTime, Utc};
use loupe_core::snapshot::DesignSnapshot;

pub use page::{Page, PageElement};

/// Extract a snapshot stamped with the current time.
pub fn extract(page: &Page) -> DesignSnapshot { extract_at(page, Utc::now()) }

/// Extract a snapshot stamped with `timestamp`.
pub fn extract_at(page: &Page, timestamp: DateTime<Utc>) -> DesignSnapshot {
  let colors = color::extract_colors(&page.elements);
  let typography = typography::extract_typography(&page.elements);
  let layout = layout::extract_layout(&page.elements);
  let effects = effects::extract_effects(&page.elements);

  let style_categories = classify::classify(&classify::Signals {
    colors:      &colors.swatches,
    translucent: colors.translucent,
    effects:     &effects,
    layout:      &layout,
  });

  tracing::debug!(
    url = %page.url,
    elements = page.elements.len(),
    colors = colors.swatches.len(),
    fonts = typography.fonts.len(),
    ?style_categories,
    "extracted design snapshot"
  );

  DesignSnapshot {
    url: page.url.clone(),
    title: page.title.clone(),
    timestamp,
    colors: colors.swatches,
    typography,
    layout,
    effects,
    style_categories,
    meta: page.meta.clone(),
  }
}
