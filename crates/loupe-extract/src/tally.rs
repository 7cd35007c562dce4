//! Frequency counting that remembers first-seen order.

use std::{collections::HashMap, hash::Hash};

/// Counts occurrences per key. Ranking is by descending count; ties keep the
/// order in which keys were first seen.
#[derive(Debug)]
pub(crate) struct Tally<K> {
  entries: Vec<(K, u32)>,
  index:   HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
  pub fn new() -> Self { Self { entries: Vec::new(), index: HashMap::new() } }

  pub fn add(&mut self, key: K) {
    match self.index.get(&key) {
      Some(&i) => self.entries[i].1 += 1,
      None => {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, 1));
      }
    }
  }

  /// The `limit` most frequent keys.
  pub fn ranked(mut self, limit: usize) -> Vec<(K, u32)> {
    // `sort_by` is stable, which preserves first-seen order among ties.
    self.entries.sort_by(|a, b| b.1.cmp(&a.1));
    self.entries.truncate(limit);
    self.entries
  }
}

/// Push `value` unless already present or `list` is at `cap`.
pub(crate) fn push_distinct(list: &mut Vec<String>, value: &str, cap: usize) {
  if list.len() < cap && !list.iter().any(|v| v == value) {
    list.push(value.to_owned());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ranks_by_count_then_first_seen() {
    let mut t = Tally::new();
    for k in ["b", "a", "c", "a", "c", "d"] {
      t.add(k);
    }
    assert_eq!(t.ranked(3), vec![("a", 2), ("c", 2), ("b", 1)]);
  }

  #[test]
  fn push_distinct_honours_cap() {
    let mut list = Vec::new();
    for v in ["x", "x", "y", "z"] {
      push_distinct(&mut list, v, 2);
    }
    assert_eq!(list, vec!["x", "y"]);
  }
}
