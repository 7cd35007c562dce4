//! Labeled-line parser for generator output.
//!
//! The generator is asked for one `LABEL: value` line per field, but real
//! responses wrap labels in markdown, prefix them with list bullets, or put
//! several on one line. Parsing is line-oriented and forgiving:
//!
//! * leading decoration (`-`, `*`, `#`, `>`, whitespace) is skipped;
//! * a label matches case-insensitively, `_`, space and `-` being
//!   interchangeable, when it is followed by `:` (optionally after `**`) and
//!   not preceded by a word character;
//! * a value runs to the end of the line or to the next label on the same
//!   line;
//! * the first occurrence of a label wins.

use std::collections::BTreeMap;

use loupe_core::analysis::AnalysisField;
use strum::IntoEnumIterator;

/// The result of looking a field up in parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
  /// The label never appeared.
  Absent,
  /// The label appeared with nothing after the colon.
  Empty,
  Value(&'a str),
}

impl<'a> Lookup<'a> {
  /// The value, if non-empty.
  pub fn value(self) -> Option<&'a str> {
    match self {
      Lookup::Value(v) => Some(v),
      Lookup::Absent | Lookup::Empty => None,
    }
  }
}

/// Labeled fields found in a block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledText {
  values: BTreeMap<AnalysisField, String>,
}

impl LabeledText {
  pub fn parse(text: &str) -> Self {
    let mut values = BTreeMap::new();
    for raw in text.lines() {
      let line = strip_decoration(raw);
      let hits = find_labels(line);
      for (i, hit) in hits.iter().enumerate() {
        let end = hits.get(i + 1).map_or(line.len(), |next| next.start);
        let mut value = line[hit.value_start..end].trim();
        if end < line.len() {
          value = value.trim_end_matches(['|', ';', ',']).trim_end();
        }
        values
          .entry(hit.field)
          .or_insert_with(|| unwrap_value(value).to_owned());
      }
    }
    Self { values }
  }

  pub fn lookup(&self, field: AnalysisField) -> Lookup<'_> {
    match self.values.get(&field) {
      None => Lookup::Absent,
      Some(v) if v.is_empty() => Lookup::Empty,
      Some(v) => Lookup::Value(v),
    }
  }

  /// Number of labels found, empty ones included.
  pub fn len(&self) -> usize { self.values.len() }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

// ─── Line scanning ───────────────────────────────────────────────────────────

struct LabelHit {
  field:       AnalysisField,
  /// Byte offset of the label in the line.
  start:       usize,
  /// Byte offset just past the colon.
  value_start: usize,
}

fn strip_decoration(line: &str) -> &str {
  line.trim_start_matches(|c: char| matches!(c, '-' | '*' | '#' | '>') || c.is_whitespace())
}

fn is_word(c: char) -> bool { c.is_alphanumeric() || c == '_' }

/// Every label occurrence in `line`, ordered by position, non-overlapping.
fn find_labels(line: &str) -> Vec<LabelHit> {
  // Byte-for-byte the same length as `line`: only ASCII bytes are rewritten.
  let folded: String = line
    .chars()
    .map(|c| match c {
      ' ' | '-' => '_',
      c => c.to_ascii_uppercase(),
    })
    .collect();

  let mut hits = Vec::new();
  for field in AnalysisField::iter() {
    let label = field.label();
    for (start, _) in folded.match_indices(label) {
      if line[..start].chars().next_back().is_some_and(is_word) {
        continue;
      }
      let after = start + label.len();
      if line[after..].chars().next().is_some_and(is_word) {
        continue;
      }
      let rest = &line[after..];
      let gap = rest.len() - rest.trim_start_matches(|c: char| c == '*' || c == ' ').len();
      if rest[gap..].starts_with(':') {
        hits.push(LabelHit { field, start, value_start: after + gap + 1 });
      }
    }
  }

  hits.sort_by_key(|h| h.start);
  let mut kept: Vec<LabelHit> = Vec::with_capacity(hits.len());
  for hit in hits {
    if kept.last().is_none_or(|prev| hit.start >= prev.value_start) {
      kept.push(hit);
    }
  }
  kept
}

/// Remove `**`, quotes or brackets that wrap the whole value.
fn unwrap_value(mut value: &str) -> &str {
  loop {
    let inner = [("**", "**"), ("\"", "\""), ("'", "'"), ("[", "]"), ("`", "`")]
      .iter()
      .find_map(|(open, close)| {
        value
          .strip_prefix(open)
          .and_then(|v| v.strip_suffix(close))
          .filter(|_| value.len() >= open.len() + close.len())
      });
    match inner {
      Some(v) => value = v.trim(),
      None => return value,
    }
  }
}
