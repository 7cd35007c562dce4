//! `loupe`: command-line client for the loupe collection server.
//!
//! # Usage
//!
//! ```
//! loupe extract page.html --url https://example.com
//! loupe --url http://localhost:3847 submit page.html --url https://example.com
//! loupe list
//! loupe delete 3
//! loupe --config ~/.config/loupe/config.toml stats
//! ```

mod client;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use loupe_core::{
  analysis::AnalysisField,
  record::Record,
  snapshot::DesignSnapshot,
  store::TableCounts,
};
use loupe_extract::Page;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:3847";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "loupe", about = "Collect and browse web design references")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the loupe server (default: http://localhost:3847).
  #[arg(long, env = "LOUPE_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Extract design signals from a saved HTML file and print them as JSON.
  Extract {
    file: PathBuf,
    /// Address the page was saved from.
    #[arg(long)]
    url:  String,
  },
  /// Extract locally, then send the snapshot to the server for analysis.
  Submit {
    file: PathBuf,
    /// Address the page was saved from.
    #[arg(long)]
    url:  String,
  },
  /// List collected designs, newest first.
  List,
  /// Delete a collected design by id.
  Delete { id: String },
  /// Row counts per data table.
  Stats,
  /// Check that the server is up.
  Health,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// Flag (or env) overrides config file, which overrides the default.
fn resolve_base_url(flag: Option<String>, file_cfg: &ConfigFile) -> String {
  flag
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let api_config = ApiConfig { base_url: resolve_base_url(args.url, &file_cfg) };

  match args.command {
    Command::Extract { file, url } => {
      let snapshot = extract_file(&file, &url)?;
      println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Command::Submit { file, url } => {
      let snapshot = extract_file(&file, &url)?;
      let reply = ApiClient::new(api_config)?.analyze(&snapshot).await?;
      if reply.saved_to.is_empty() {
        println!("Already collected: {url}");
      } else {
        println!("Saved to {}", reply.saved_to.join(", "));
      }
      if let Some(note) = reply.note {
        println!("{note}");
      }
      if let Some(analysis) = reply.analysis {
        println!("\n{analysis}");
      }
    }
    Command::List => {
      let designs = ApiClient::new(api_config)?.list().await?;
      print!("{}", render_list(&designs));
    }
    Command::Delete { id } => {
      ApiClient::new(api_config)?.delete(&id).await?;
      println!("Deleted {id}");
    }
    Command::Stats => {
      let counts = ApiClient::new(api_config)?.stats().await?;
      print!("{}", render_stats(&counts));
    }
    Command::Health => {
      let health = ApiClient::new(api_config)?.health().await?;
      println!("{}", serde_json::to_string_pretty(&health)?);
    }
  }

  Ok(())
}

fn extract_file(path: &Path, url: &str) -> Result<DesignSnapshot> {
  let html = std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;
  Ok(loupe_extract::extract(&Page::from_html(url, &html)))
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn render_list(designs: &[Record]) -> String {
  if designs.is_empty() {
    return "No designs collected yet.\n".into();
  }
  let id_width = designs.iter().map(|r| r.id.len()).max().unwrap_or(0).max(2);
  let mut out = String::new();
  for record in designs {
    out.push_str(&format!(
      "{:>id_width$}  {:<10}  {:<28}  {}\n",
      record.id,
      record.date,
      record.fields.get(AnalysisField::StyleCategory),
      record.source,
    ));
  }
  out
}

fn render_stats(counts: &TableCounts) -> String {
  let width = counts.keys().map(String::len).max().unwrap_or(0);
  counts
    .iter()
    .map(|(table, n)| format!("{table:<width$}  {n}\n"))
    .collect()
}
