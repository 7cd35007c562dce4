//! loupe server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! CSV store under `data_dir`, and serves the collection API over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use loupe_api::AppState;
use loupe_server::{CliGenerator, ServerConfig};
use loupe_store_csv::CsvStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Loupe design collection server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let data_dir = expand_tilde(&server_cfg.data_dir);
  std::fs::create_dir_all(&data_dir)
    .with_context(|| format!("failed to create data directory {data_dir:?}"))?;
  let store = CsvStore::open(
    &data_dir,
    server_cfg.table_file.clone(),
    server_cfg.stats_tables.clone(),
  );
  tracing::info!("Storing designs in {:?}", store.table_path());

  tracing::info!(
    program = %server_cfg.generator.program,
    timeout_secs = server_cfg.generator.timeout_secs,
    "using external generator"
  );
  let generator = CliGenerator::new(server_cfg.generator.clone());

  let state = AppState::new(store, generator);
  let app = loupe_api::router(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for ctrl-c: {e}");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
