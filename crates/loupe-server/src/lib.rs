//! Host process for Loupe: configuration and the external generator.
//!
//! The `server` binary wires a [`loupe_store_csv::CsvStore`] and a
//! [`CliGenerator`] into the [`loupe_api`] router.

pub mod generator;

use std::path::{Path, PathBuf};

use loupe_store_csv::{DEFAULT_STATS_TABLES, DEFAULT_TABLE_FILE};
use serde::Deserialize;

pub use generator::CliGenerator;

/// Environment variables with this prefix override file settings;
/// `__` separates nested keys (`LOUPE_GENERATOR__TIMEOUT_SECS`).
pub const ENV_PREFIX: &str = "LOUPE";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Directory holding the CSV tables; `~` is expanded.
  pub data_dir:     PathBuf,
  pub table_file:   String,
  /// Tables reported by `GET /data`.
  pub stats_tables: Vec<String>,
  pub generator:    GeneratorConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "127.0.0.1".into(),
      port:         3847,
      data_dir:     PathBuf::from("data"),
      table_file:   DEFAULT_TABLE_FILE.into(),
      stats_tables: DEFAULT_STATS_TABLES.iter().map(|s| s.to_string()).collect(),
      generator:    GeneratorConfig::default(),
    }
  }
}

/// The external generator command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
  pub program:      String,
  pub args:         Vec<String>,
  pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      program:      "claude".into(),
      args:         vec!["-p".into()],
      timeout_secs: 60,
    }
  }
}

impl ServerConfig {
  /// Read `path` (optional) overlaid with `LOUPE_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/loupe.toml")).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:3847");
    assert_eq!(cfg.table_file, "collected-designs.csv");
    assert_eq!(cfg.stats_tables.len(), 4);
    assert_eq!(cfg.generator.program, "claude");
    assert_eq!(cfg.generator.args, vec!["-p"]);
    assert_eq!(cfg.generator.timeout_secs, 60);
  }

  #[test]
  fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
      &path,
      "port = 9000\ndata_dir = \"~/designs\"\n\n[generator]\ntimeout_secs = 5\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.data_dir, PathBuf::from("~/designs"));
    assert_eq!(cfg.generator.timeout_secs, 5);
    assert_eq!(cfg.generator.program, "claude");
  }
}
