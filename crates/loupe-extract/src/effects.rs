//! Effects extraction: shadows, radii, gradients, blur, motion, and
//! interaction affordances.

use loupe_core::snapshot::Effects;

use crate::{page::PageElement, tally::push_distinct};

pub const MAX_SHADOWS: usize = 5;
pub const MAX_RADII: usize = 5;
pub const MAX_GRADIENTS: usize = 5;
pub const MAX_ANIMATIONS: usize = 10;
pub const MAX_TRANSITIONS: usize = 8;
pub const MAX_TRANSFORMS: usize = 5;

/// The computed `transition` of an element with no transition.
const NO_TRANSITION: &str = "all 0s ease 0s";

// ─── Interaction rules ───────────────────────────────────────────────────────

/// One affordance detector: elements matching `matches` produce `tag`,
/// suffixed with the match count when `counted`.
pub struct InteractionRule {
  pub tag:     &'static str,
  pub counted: bool,
  pub matches: fn(&PageElement) -> bool,
}

fn role_is(el: &PageElement, role: &str) -> bool { el.attr("role") == Some(role) }

fn class_any(el: &PageElement, needles: &[&str]) -> bool {
  needles.iter().any(|n| el.class_contains(n))
}

/// Evaluated in order; each contributes at most one tag.
pub const INTERACTION_RULES: &[InteractionRule] = &[
  InteractionRule {
    tag:     "buttons",
    counted: true,
    matches: |el| {
      el.is("button")
        || role_is(el, "button")
        || (el.is("a") && el.has_class("btn"))
        || el.has_class("button")
    },
  },
  InteractionRule {
    tag:     "cards",
    counted: true,
    matches: |el| class_any(el, &["card", "Card"]),
  },
  InteractionRule {
    tag:     "modals",
    counted: false,
    matches: |el| class_any(el, &["modal", "dialog"]) || role_is(el, "dialog"),
  },
  InteractionRule {
    tag:     "dropdowns",
    counted: false,
    matches: |el| class_any(el, &["dropdown", "menu"]) || el.is("select"),
  },
  InteractionRule {
    tag:     "carousel/slider",
    counted: false,
    matches: |el| class_any(el, &["carousel", "slider", "swiper"]),
  },
  InteractionRule {
    tag:     "accordions",
    counted: false,
    matches: |el| class_any(el, &["accordion", "collapse"]) || el.is("details"),
  },
  InteractionRule {
    tag:     "tabs",
    counted: false,
    matches: |el| role_is(el, "tablist") || el.class_contains("tabs"),
  },
  InteractionRule {
    tag:     "tooltips",
    counted: false,
    matches: |el| el.class_contains("tooltip") || el.attr("data-tooltip").is_some(),
  },
  InteractionRule {
    tag:     "scroll-animations",
    counted: false,
    matches: |el| class_any(el, &["aos", "scroll", "reveal", "animate"]),
  },
  InteractionRule {
    tag:     "parallax/sticky",
    counted: false,
    matches: |el| {
      el.class_contains("parallax")
        || el.attr("data-parallax").is_some()
        || el.class_contains("sticky")
    },
  },
];

/// Apply [`INTERACTION_RULES`] to the page.
pub fn detect_interactions(elements: &[PageElement]) -> Vec<String> {
  INTERACTION_RULES
    .iter()
    .filter_map(|rule| {
      let n = elements.iter().filter(|el| (rule.matches)(el)).count();
      match (n, rule.counted) {
        (0, _) => None,
        (n, true) => Some(format!("{}({n})", rule.tag)),
        (_, false) => Some(rule.tag.to_owned()),
      }
    })
    .collect()
}

// ─── Per-element readers ─────────────────────────────────────────────────────

fn is_none(value: &str) -> bool { value.eq_ignore_ascii_case("none") }

/// `"{transition-property} {transition-duration}"` for an element that has a
/// real transition.
fn transition_pair(el: &PageElement) -> Option<String> {
  let transition = el.style("transition")?;
  if is_none(transition) || transition == NO_TRANSITION {
    return None;
  }
  let property = el.style("transition-property").unwrap_or("all");
  let duration = el.style("transition-duration").unwrap_or("0s");
  Some(format!("{property} {duration}"))
}

/// Leading transform function name: `translateY(-4px) scale(1.02)` →
/// `translateY`.
fn transform_kind(transform: &str) -> Option<&str> {
  let end = transform
    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
    .unwrap_or(transform.len());
  (end > 0).then(|| &transform[..end])
}

pub fn extract_effects(elements: &[PageElement]) -> Effects {
  let mut fx = Effects::default();

  for el in elements {
    if let Some(shadow) = el.style("box-shadow").filter(|v| !is_none(v)) {
      push_distinct(&mut fx.shadows, shadow, MAX_SHADOWS);
    }
    if let Some(radius) = el.style("border-radius").filter(|v| *v != "0px") {
      push_distinct(&mut fx.border_radius, radius, MAX_RADII);
    }
    if let Some(image) = el.style("background-image").filter(|v| v.contains("gradient")) {
      push_distinct(&mut fx.gradients, image, MAX_GRADIENTS);
    }
    let backdrop = el
      .style("backdrop-filter")
      .or_else(|| el.style("-webkit-backdrop-filter"));
    if backdrop.is_some_and(|v| !is_none(v)) {
      fx.blur = true;
    }
    if let Some(name) = el.style("animation-name").filter(|v| !is_none(v)) {
      push_distinct(&mut fx.animations, name, MAX_ANIMATIONS);
    }
    if let Some(pair) = transition_pair(el) {
      push_distinct(&mut fx.transitions, &pair, MAX_TRANSITIONS);
    }
    if let Some(kind) = el
      .style("transform")
      .filter(|v| !is_none(v))
      .and_then(transform_kind)
    {
      push_distinct(&mut fx.transforms, kind, MAX_TRANSFORMS);
    }
  }

  fx.interactions = detect_interactions(elements);
  fx
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn visual_effects_are_distinct_and_capped() {
    let mut elements: Vec<_> = (0..8)
      .map(|i| {
        PageElement::new("div")
          .with_style("box-shadow", &format!("rgba(0, 0, 0, 0.1) 0px {i}px 4px 0px"))
          .with_style("border-radius", "8px")
      })
      .collect();
    elements.push(
      PageElement::new("div")
        .with_style("box-shadow", "none")
        .with_style("border-radius", "0px")
        .with_style("background-image", "linear-gradient(90deg, #fff, #000)"),
    );
    elements.push(PageElement::new("img").with_style("background-image", "url(a.png)"));

    let fx = extract_effects(&elements);
    assert_eq!(fx.shadows.len(), MAX_SHADOWS);
    assert_eq!(fx.border_radius, vec!["8px"]);
    assert_eq!(fx.gradients, vec!["linear-gradient(90deg, #fff, #000)"]);
    assert!(!fx.blur);
  }

  #[test]
  fn blur_is_sticky_once_seen() {
    let elements = vec![
      PageElement::new("nav").with_style("backdrop-filter", "blur(12px)"),
      PageElement::new("div").with_style("backdrop-filter", "none"),
    ];
    assert!(extract_effects(&elements).blur);
  }

  #[test]
  fn motion_is_summarised() {
    let elements = vec![
      PageElement::new("a")
        .with_style("transition", "color 0.2s ease 0s")
        .with_style("transition-property", "color")
        .with_style("transition-duration", "0.2s")
        .with_style("transform", "translateY(-4px) scale(1.02)")
        .with_style("animation-name", "fadeIn"),
      PageElement::new("div")
        .with_style("transition", "all 0s ease 0s")
        .with_style("transform", "none")
        .with_style("animation-name", "none"),
      PageElement::new("div").with_style("transform", "matrix(1, 0, 0, 1, 0, 0)"),
    ];
    let fx = extract_effects(&elements);
    assert_eq!(fx.transitions, vec!["color 0.2s"]);
    assert_eq!(fx.transforms, vec!["translateY", "matrix"]);
    assert_eq!(fx.animations, vec!["fadeIn"]);
  }

  #[test]
  fn interactions_follow_rule_order_with_counts() {
    let elements = vec![
      PageElement::new("div").with_attr("class", "sticky top-0"),
      PageElement::new("button"),
      PageElement::new("a").with_attr("class", "btn"),
      PageElement::new("span").with_attr("role", "button"),
      PageElement::new("div").with_attr("class", "ProductCard"),
      PageElement::new("details"),
      PageElement::new("span").with_attr("data-tooltip", "hi"),
    ];
    assert_eq!(detect_interactions(&elements), vec![
      "buttons(3)",
      "cards(1)",
      "accordions",
      "tooltips",
      "parallax/sticky",
    ]);
  }

  #[test]
  fn no_affordances_means_no_tags() {
    assert!(detect_interactions(&[PageElement::new("p")]).is_empty());
  }
}
