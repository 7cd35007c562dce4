//! [`CsvStore`]: the CSV implementation of [`DesignStore`].

use std::{
  collections::HashSet,
  fs::{self, OpenOptions},
  io::{self, Write as _},
  path::{Path, PathBuf},
  sync::Arc,
};

use loupe_core::{
  record::{Column, NewRecord, Record},
  store::{CreateOutcome, DeleteOutcome, DesignStore, TableCounts},
};
use tokio::sync::Mutex;

use crate::{
  Error, Result,
  codec::{first_value, format_row, header_line, parse_line},
};

/// Default table file name.
pub const DEFAULT_TABLE_FILE: &str = "collected-designs.csv";

/// Tables reported by [`DesignStore::table_counts`] unless configured
/// otherwise.
pub const DEFAULT_STATS_TABLES: [&str; 4] =
  ["styles.csv", "colors.csv", "typography.csv", DEFAULT_TABLE_FILE];

// ─── Index ───────────────────────────────────────────────────────────────────

/// In-memory view of the table file, loaded on first use.
#[derive(Debug, Default)]
struct Index {
  exists:  bool,
  /// Raw and parsed header line; `None` for an absent or empty file.
  header:  Option<(String, Vec<String>)>,
  /// Non-blank data lines, verbatim, in physical order.
  lines:   Vec<String>,
  /// Unescaped `Source` values of all rows.
  sources: HashSet<String>,
  /// One more than the highest numeric id seen since the store was opened.
  next_id: u64,
}

impl Index {
  fn load(path: &Path) -> Result<Self> {
    let text = match fs::read_to_string(path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
      Err(e) => return Err(Error::io(path)(e)),
    };

    let mut index = Self { exists: true, ..Default::default() };
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    if let Some(header) = lines.next() {
      index.header = Some((header.to_owned(), parse_line(header)));
    }
    for line in lines {
      index.track(line);
      index.lines.push(line.to_owned());
    }
    Ok(index)
  }

  fn position(&self, column: Column) -> Option<usize> {
    let (_, names) = self.header.as_ref()?;
    names.iter().position(|n| n.trim() == column.name())
  }

  /// Register a data line's source and id.
  fn track(&mut self, line: &str) {
    let values = parse_line(line);
    if let Some(source) = self.position(Column::Source).and_then(|i| values.get(i)) {
      self.sources.insert(source.clone());
    }
    if let Some(id) = values.first().and_then(|v| v.trim().parse::<u64>().ok()) {
      self.next_id = self.next_id.max(id + 1);
    }
  }

  fn record(&self, line: &str) -> Record {
    let values = parse_line(line);
    Record::from_lookup(|name| {
      self
        .header
        .as_ref()
        .and_then(|(_, names)| names.iter().position(|n| n.trim() == name))
        .and_then(|i| values.get(i))
        .map(String::as_str)
    })
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A design table backed by one CSV file.
///
/// The store assumes it is the only writer of its table file. All operations
/// are serialised through one async mutex; the file access inside each
/// critical section runs on the blocking thread pool.
#[derive(Debug)]
pub struct CsvStore {
  dir:          PathBuf,
  table_file:   String,
  stats_tables: Vec<String>,
  index:        Arc<Mutex<Option<Index>>>,
}

impl CsvStore {
  /// A store over `dir/table_file`. Nothing is read until the first
  /// operation; `dir` is created on first write.
  pub fn open(
    dir: impl Into<PathBuf>,
    table_file: impl Into<String>,
    stats_tables: Vec<String>,
  ) -> Self {
    Self {
      dir: dir.into(),
      table_file: table_file.into(),
      stats_tables,
      index: Arc::new(Mutex::new(None)),
    }
  }

  /// A store with the default table and stats file names.
  pub fn with_defaults(dir: impl Into<PathBuf>) -> Self {
    Self::open(
      dir,
      DEFAULT_TABLE_FILE,
      DEFAULT_STATS_TABLES.iter().map(|s| s.to_string()).collect(),
    )
  }

  pub fn table_path(&self) -> PathBuf { self.dir.join(&self.table_file) }

  /// Run `f` against the loaded index under the store lock, on the blocking
  /// pool. The index is reloaded whenever the table file has appeared or
  /// vanished since it was last read.
  async fn with_index<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut Index, &Path) -> Result<T> + Send + 'static,
  {
    let path = self.table_path();
    let mut guard = self.index.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || {
      let exists = path.try_exists().map_err(Error::io(&path))?;
      let index = match guard.take() {
        Some(index) if index.exists == exists => index,
        _ => Index::load(&path)?,
      };
      let index = guard.insert(index);
      f(index, &path)
    })
    .await?
  }
}

fn rewrite(path: &Path, header: &str, lines: &[String]) -> Result<()> {
  let mut body = String::from(header);
  body.push('\n');
  for line in lines {
    body.push_str(line);
    body.push('\n');
  }
  let tmp = path.with_extension("csv.tmp");
  fs::write(&tmp, body).map_err(Error::io(&tmp))?;
  fs::rename(&tmp, path).map_err(Error::io(path))
}

fn count_rows(path: &Path) -> Result<usize> {
  match fs::read_to_string(path) {
    Ok(text) => Ok(text.lines().filter(|l| !l.trim().is_empty()).count().saturating_sub(1)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
    Err(e) => Err(Error::io(path)(e)),
  }
}

impl DesignStore for CsvStore {
  type Error = Error;

  async fn create(&self, record: NewRecord) -> Result<CreateOutcome> {
    let file = self.table_file.clone();
    let dir = self.dir.clone();

    self
      .with_index(move |index, path| {
        if index.sources.contains(&record.source) {
          tracing::info!(source = %record.source, "skipped duplicate source");
          return Ok(CreateOutcome::Duplicate);
        }

        let id = index.next_id.to_string();
        let date = record.date.format("%Y-%m-%d").to_string();
        let saved = Record {
          id: id.clone(),
          date,
          source: record.source,
          fields: record.fields,
        };
        let row = format_row(saved.values());

        let mut chunk = String::new();
        let new_header = index.header.is_none().then(header_line);
        if let Some(header) = &new_header {
          chunk.push_str(header);
          chunk.push('\n');
        }
        chunk.push_str(&row);
        chunk.push('\n');

        fs::create_dir_all(&dir).map_err(Error::io(&dir))?;
        let mut out = OpenOptions::new()
          .create(true)
          .append(true)
          .open(path)
          .map_err(Error::io(path))?;
        out.write_all(chunk.as_bytes()).map_err(Error::io(path))?;

        if let Some(header) = new_header {
          let names = parse_line(&header);
          index.header = Some((header, names));
        }
        index.exists = true;
        index.track(&row);
        index.lines.push(row);

        tracing::info!(
          id = %saved.id,
          style = %saved.fields.style_category,
          source = %saved.source,
          "saved design record"
        );
        Ok(CreateOutcome::Saved { id, file })
      })
      .await
  }

  async fn list(&self) -> Result<Vec<Record>> {
    self
      .with_index(|index, _| {
        Ok(index.lines.iter().rev().map(|line| index.record(line)).collect())
      })
      .await
  }

  async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
    let id = id.to_owned();
    self
      .with_index(move |index, path| {
        if !index.exists {
          return Ok(DeleteOutcome::NoDataFile);
        }

        let kept: Vec<String> = index
          .lines
          .iter()
          .filter(|line| first_value(line) != id)
          .cloned()
          .collect();
        let removed = index.lines.len() - kept.len();
        if removed == 0 {
          tracing::info!(id = %id, "no design record with id");
          return Ok(DeleteOutcome::NotFound);
        }

        let header = index
          .header
          .as_ref()
          .map(|(raw, _)| raw.clone())
          .unwrap_or_else(header_line);
        // The index only changes once the file does.
        rewrite(path, &header, &kept)?;

        index.sources.clear();
        for line in &kept {
          index.track(line);
        }
        index.lines = kept;

        tracing::info!(id = %id, removed, "deleted design record");
        Ok(DeleteOutcome::Removed)
      })
      .await
  }

  async fn table_counts(&self) -> Result<TableCounts> {
    let dir = self.dir.clone();
    let tables = self.stats_tables.clone();
    // Holding the lock keeps the main table consistent with in-flight writes.
    self
      .with_index(move |_, _| {
        let mut counts = TableCounts::new();
        for name in &tables {
          let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
          counts.insert(stem, count_rows(&dir.join(name))?);
        }
        Ok(counts)
      })
      .await
  }
}
