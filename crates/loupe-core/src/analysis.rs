//! Analysis fields: the typed result of normalising a generator response.
//!
//! Every field is always present. A value is either parsed from the
//! generator's labeled-line output or a deterministic fallback derived from
//! the snapshot; the empty string is the minimum.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

// ─── Field identifiers ───────────────────────────────────────────────────────

/// One labeled field of the analysis.
///
/// The strum name is the label the generator is asked to emit
/// (`STYLE_CATEGORY: ...`); [`AnalysisField::column`] is the table column.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AnalysisField {
  StyleCategory,
  Type,
  Keywords,
  PrimaryColors,
  SecondaryColors,
  EffectsAnimation,
  BestFor,
  DoNotUseFor,
  LightMode,
  DarkMode,
  Performance,
  Accessibility,
  MobileFriendly,
  FrameworkCompat,
  Complexity,
  Notes,
}

impl AnalysisField {
  /// The generator label, e.g. `EFFECTS_ANIMATION`.
  pub fn label(self) -> &'static str { self.into() }

  /// Look up a field by label. Case-insensitive; spaces and hyphens are
  /// accepted in place of underscores.
  pub fn from_label(label: &str) -> Option<Self> {
    let normalised: String = label
      .trim()
      .chars()
      .map(|c| if c == ' ' || c == '-' { '_' } else { c })
      .collect();
    normalised.parse().ok()
  }

  /// The persisted table column name.
  pub fn column(self) -> &'static str {
    match self {
      Self::StyleCategory => "Style Category",
      Self::Type => "Type",
      Self::Keywords => "Keywords",
      Self::PrimaryColors => "Primary Colors",
      Self::SecondaryColors => "Secondary Colors",
      Self::EffectsAnimation => "Effects & Animation",
      Self::BestFor => "Best For",
      Self::DoNotUseFor => "Do Not Use For",
      Self::LightMode => "Light Mode",
      Self::DarkMode => "Dark Mode",
      Self::Performance => "Performance",
      Self::Accessibility => "Accessibility",
      Self::MobileFriendly => "Mobile-Friendly",
      Self::FrameworkCompat => "Framework Compatibility",
      Self::Complexity => "Complexity",
      Self::Notes => "Notes",
    }
  }
}

// ─── Field set ───────────────────────────────────────────────────────────────

/// The complete, never-null field set for one processed snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisFields {
  pub style_category:    String,
  #[serde(rename = "type")]
  pub kind:              String,
  pub keywords:          String,
  pub primary_colors:    String,
  pub secondary_colors:  String,
  pub effects_animation: String,
  pub best_for:          String,
  pub do_not_use_for:    String,
  pub light_mode:        String,
  pub dark_mode:         String,
  pub performance:       String,
  pub accessibility:     String,
  pub mobile_friendly:   String,
  pub framework_compat:  String,
  pub complexity:        String,
  pub notes:             String,
}

impl AnalysisFields {
  pub fn get(&self, field: AnalysisField) -> &str {
    match field {
      AnalysisField::StyleCategory => &self.style_category,
      AnalysisField::Type => &self.kind,
      AnalysisField::Keywords => &self.keywords,
      AnalysisField::PrimaryColors => &self.primary_colors,
      AnalysisField::SecondaryColors => &self.secondary_colors,
      AnalysisField::EffectsAnimation => &self.effects_animation,
      AnalysisField::BestFor => &self.best_for,
      AnalysisField::DoNotUseFor => &self.do_not_use_for,
      AnalysisField::LightMode => &self.light_mode,
      AnalysisField::DarkMode => &self.dark_mode,
      AnalysisField::Performance => &self.performance,
      AnalysisField::Accessibility => &self.accessibility,
      AnalysisField::MobileFriendly => &self.mobile_friendly,
      AnalysisField::FrameworkCompat => &self.framework_compat,
      AnalysisField::Complexity => &self.complexity,
      AnalysisField::Notes => &self.notes,
    }
  }

  pub fn get_mut(&mut self, field: AnalysisField) -> &mut String {
    match field {
      AnalysisField::StyleCategory => &mut self.style_category,
      AnalysisField::Type => &mut self.kind,
      AnalysisField::Keywords => &mut self.keywords,
      AnalysisField::PrimaryColors => &mut self.primary_colors,
      AnalysisField::SecondaryColors => &mut self.secondary_colors,
      AnalysisField::EffectsAnimation => &mut self.effects_animation,
      AnalysisField::BestFor => &mut self.best_for,
      AnalysisField::DoNotUseFor => &mut self.do_not_use_for,
      AnalysisField::LightMode => &mut self.light_mode,
      AnalysisField::DarkMode => &mut self.dark_mode,
      AnalysisField::Performance => &mut self.performance,
      AnalysisField::Accessibility => &mut self.accessibility,
      AnalysisField::MobileFriendly => &mut self.mobile_friendly,
      AnalysisField::FrameworkCompat => &mut self.framework_compat,
      AnalysisField::Complexity => &mut self.complexity,
      AnalysisField::Notes => &mut self.notes,
    }
  }

  pub fn set(&mut self, field: AnalysisField, value: impl Into<String>) {
    *self.get_mut(field) = value.into();
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn labels_round_trip_through_from_label() {
    for field in AnalysisField::iter() {
      assert_eq!(AnalysisField::from_label(field.label()), Some(field));
    }
  }

  #[test]
  fn from_label_is_lenient_about_case_and_separators() {
    assert_eq!(
      AnalysisField::from_label("do not use for"),
      Some(AnalysisField::DoNotUseFor)
    );
    assert_eq!(
      AnalysisField::from_label("Mobile-Friendly"),
      Some(AnalysisField::MobileFriendly)
    );
    assert_eq!(AnalysisField::from_label("TITLE"), None);
  }

  #[test]
  fn get_and_set_address_the_same_slot() {
    let mut fields = AnalysisFields::default();
    for field in AnalysisField::iter() {
      fields.set(field, field.column());
    }
    assert_eq!(fields.kind, "Type");
    assert_eq!(fields.get(AnalysisField::FrameworkCompat), "Framework Compatibility");
  }
}
