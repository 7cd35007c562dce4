//! The `DesignStore` trait and its operation outcomes.
//!
//! The trait is implemented by storage backends (e.g. `loupe-store-csv`).
//! The HTTP layer depends on this abstraction, not on a concrete backend.

use std::{collections::BTreeMap, future::Future};

use crate::record::{NewRecord, Record};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Result of [`DesignStore::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
  /// A new row was appended to `file`.
  Saved { id: String, file: String },
  /// A record with the same source already exists; nothing was written.
  Duplicate,
}

impl CreateOutcome {
  /// File names written by the operation; empty for a duplicate.
  pub fn saved_to(&self) -> Vec<String> {
    match self {
      CreateOutcome::Saved { file, .. } => vec![file.clone()],
      CreateOutcome::Duplicate => Vec::new(),
    }
  }
}

/// Result of [`DesignStore::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
  /// At least one row with the id was removed.
  Removed,
  /// No row had the id; the table is unchanged.
  NotFound,
  /// The table file does not exist.
  NoDataFile,
}

/// Data-row counts per table, keyed by file stem (e.g. `collected-designs`).
pub type TableCounts = BTreeMap<String, usize>;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the durable design table.
///
/// Records are keyed logically by source URL for write de-duplication and
/// by their stored identifier for deletion.
pub trait DesignStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append a record unless one with the same `source` already exists.
  fn create(
    &self,
    record: NewRecord,
  ) -> impl Future<Output = Result<CreateOutcome, Self::Error>> + Send + '_;

  /// All records, most recently appended first. An absent table yields an
  /// empty list.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Remove every record whose identifier equals `id`.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<DeleteOutcome, Self::Error>> + Send + 'a;

  /// Data-row counts for the tables this store knows about.
  fn table_counts(
    &self,
  ) -> impl Future<Output = Result<TableCounts, Self::Error>> + Send + '_;
}
