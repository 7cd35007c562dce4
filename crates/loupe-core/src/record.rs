//! Records: the durable, de-duplicated rows of the design table.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{
  Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap,
};

use crate::analysis::{AnalysisField, AnalysisFields};

// ─── Columns ─────────────────────────────────────────────────────────────────

/// One column of the persisted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
  Id,
  Date,
  Source,
  Field(AnalysisField),
}

impl Column {
  /// Physical column order of the table.
  pub const ALL: [Column; 19] = [
    Column::Id,
    Column::Date,
    Column::Field(AnalysisField::StyleCategory),
    Column::Field(AnalysisField::Type),
    Column::Source,
    Column::Field(AnalysisField::Keywords),
    Column::Field(AnalysisField::PrimaryColors),
    Column::Field(AnalysisField::SecondaryColors),
    Column::Field(AnalysisField::EffectsAnimation),
    Column::Field(AnalysisField::BestFor),
    Column::Field(AnalysisField::DoNotUseFor),
    Column::Field(AnalysisField::LightMode),
    Column::Field(AnalysisField::DarkMode),
    Column::Field(AnalysisField::Performance),
    Column::Field(AnalysisField::Accessibility),
    Column::Field(AnalysisField::MobileFriendly),
    Column::Field(AnalysisField::FrameworkCompat),
    Column::Field(AnalysisField::Complexity),
    Column::Field(AnalysisField::Notes),
  ];

  pub fn name(self) -> &'static str {
    match self {
      Column::Id => "ID",
      Column::Date => "Date",
      Column::Source => "Source",
      Column::Field(f) => f.column(),
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.name() == name.trim())
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Input to [`DesignStore::create`](crate::store::DesignStore::create).
/// The identifier is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewRecord {
  pub date:   NaiveDate,
  pub source: String,
  pub fields: AnalysisFields,
}

/// A persisted row.
///
/// `id` and `date` are kept as the text found in the table so malformed rows
/// survive a read/rewrite cycle untouched. Serialises as a map keyed by
/// column name, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
  pub id:     String,
  pub date:   String,
  pub source: String,
  pub fields: AnalysisFields,
}

impl Record {
  pub fn get(&self, column: Column) -> &str {
    match column {
      Column::Id => &self.id,
      Column::Date => &self.date,
      Column::Source => &self.source,
      Column::Field(f) => self.fields.get(f),
    }
  }

  /// Build a record by looking each column up by name; absent columns
  /// resolve to the empty string.
  pub fn from_lookup<'a>(mut lookup: impl FnMut(&str) -> Option<&'a str>) -> Self {
    let mut record = Record::default();
    for column in Column::ALL {
      let value = lookup(column.name()).unwrap_or_default().to_owned();
      match column {
        Column::Id => record.id = value,
        Column::Date => record.date = value,
        Column::Source => record.source = value,
        Column::Field(f) => record.fields.set(f, value),
      }
    }
    record
  }

  /// All values in physical column order.
  pub fn values(&self) -> impl Iterator<Item = &str> {
    Column::ALL.into_iter().map(|c| self.get(c))
  }
}

impl Serialize for Record {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(Column::ALL.len()))?;
    for column in Column::ALL {
      map.serialize_entry(column.name(), self.get(column))?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for Record {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let map = HashMap::<String, String>::deserialize(deserializer)?;
    Ok(Record::from_lookup(|name| map.get(name).map(String::as_str)))
  }
}
