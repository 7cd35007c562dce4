//! Static-HTML loader: builds a [`Page`] from markup with `scraper`.
//!
//! Static HTML has no computed style, so inline `style` declarations stand in
//! for it. Widths come from a `width` attribute or an inline `width: Npx`.

use loupe_core::snapshot::PageMeta;
use scraper::{ElementRef, Html};

use crate::page::{Page, PageElement, parse_declarations};

pub(crate) fn load(url: &str, html: &str) -> Page {
  let doc = Html::parse_document(html);

  let mut title = None;
  let mut meta = PageMeta::default();
  let mut elements = Vec::new();

  for node in doc.root_element().descendants() {
    let Some(el) = ElementRef::wrap(node) else { continue };
    let value = el.value();
    let tag = value.name().to_ascii_lowercase();

    match tag.as_str() {
      "title" if title.is_none() => {
        title = Some(el.text().collect::<String>().trim().to_string());
      }
      "meta" => match (value.attr("name"), value.attr("content")) {
        (Some("viewport"), Some(content)) => meta.viewport = content.to_owned(),
        (Some("theme-color"), Some(content)) if meta.theme_color.is_none() => {
          meta.theme_color = Some(content.to_owned());
        }
        _ => {}
      },
      _ => {}
    }

    let mut element = PageElement::new(tag);
    for (name, attr) in value.attrs() {
      element.attributes.insert(name.to_owned(), attr.to_owned());
    }
    if let Some(inline) = value.attr("style") {
      for (prop, decl) in parse_declarations(inline) {
        expand_shorthand(&mut element, &prop, &decl);
        element.style.insert(prop, decl);
      }
    }
    let width = value
      .attr("width")
      .and_then(parse_px)
      .or_else(|| element.style("width").and_then(parse_px));
    element.width = width;

    elements.push(element);
  }

  Page {
    url: url.to_owned(),
    title: title.unwrap_or_default(),
    meta,
    elements,
  }
}

/// Map the shorthands whose longhands the extractor reads. Longhands declared
/// explicitly win because they are inserted by their own declaration.
fn expand_shorthand(element: &mut PageElement, prop: &str, value: &str) {
  let mut fill = |longhand: &str, v: &str| {
    element
      .style
      .entry(longhand.to_owned())
      .or_insert_with(|| v.to_owned());
  };
  match prop {
    "background" if value.contains("gradient") => fill("background-image", value),
    "background" if looks_like_color(value) => fill("background-color", value),
    "transition" => {
      let mut parts = value.split_whitespace();
      if let (Some(property), Some(duration)) = (parts.next(), parts.next()) {
        fill("transition-property", property);
        fill("transition-duration", duration);
      }
    }
    "animation" => {
      if let Some(name) = value.split_whitespace().find(|t| {
        !t.starts_with(|c: char| c.is_ascii_digit() || c == '.')
          && !ANIMATION_KEYWORDS.contains(t)
      }) {
        fill("animation-name", name);
      }
    }
    _ => {}
  }
}

const ANIMATION_KEYWORDS: &[&str] = &[
  "ease", "ease-in", "ease-out", "ease-in-out", "linear", "infinite",
  "alternate", "reverse", "forwards", "backwards", "both", "normal",
  "running", "paused",
];

fn looks_like_color(value: &str) -> bool {
  let v = value.trim_start();
  v.starts_with('#') || v.starts_with("rgb")
}

fn parse_px(value: &str) -> Option<u32> {
  let v = value.trim();
  let digits = v.strip_suffix("px").unwrap_or(v).trim();
  digits.parse::<f64>().ok().filter(|w| *w >= 0.0).map(|w| w.round() as u32)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loads_title_meta_and_inline_style() {
    let page = load(
      "https://example.com",
      r#"<html><head><title> Example </title>
         <meta name="viewport" content="width=device-width"></head>
         <body><div class="wrapper" style="width: 960px; background: #123456"></div></body></html>"#,
    );
    assert_eq!(page.title, "Example");
    assert_eq!(page.meta.viewport, "width=device-width");
    assert_eq!(page.meta.theme_color, None);

    let div = page.elements.iter().find(|e| e.is("div")).unwrap();
    assert_eq!(div.width, Some(960));
    assert_eq!(div.style("background-color"), Some("#123456"));
  }

  #[test]
  fn shorthand_transition_and_animation_are_expanded() {
    let page = load(
      "https://example.com",
      r#"<p style="transition: opacity 0.3s ease; animation: 1s ease-in fadeUp"></p>"#,
    );
    let p = page.elements.iter().find(|e| e.is("p")).unwrap();
    assert_eq!(p.style("transition-property"), Some("opacity"));
    assert_eq!(p.style("transition-duration"), Some("0.3s"));
    assert_eq!(p.style("animation-name"), Some("fadeUp"));
  }

  #[test]
  fn parse_px_accepts_bare_numbers() {
    assert_eq!(parse_px("320"), Some(320));
    assert_eq!(parse_px("320.4px"), Some(320));
    assert_eq!(parse_px("50%"), None);
  }
}
