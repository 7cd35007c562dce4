//! JSON HTTP API for Loupe.
//!
//! Exposes an axum [`Router`] backed by any [`DesignStore`] and
//! [`TextGenerator`]. CORS is permissive so a browser extension on any origin
//! can post to it.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/health` | [`health`] |
//! | `POST` | `/extract` | [`extract::handler`] |
//! | `POST` | `/analyze` | [`analyze::handler`] |
//! | `GET`  | `/data` | [`designs::data`] |
//! | `GET`  | `/list` | [`designs::list`] |
//! | `POST` | `/delete` | [`designs::delete`] |

pub mod analyze;
pub mod designs;
pub mod error;
pub mod extract;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::DefaultBodyLimit,
  http::StatusCode,
  response::IntoResponse,
  routing::{get, post},
};
use loupe_core::{generate::TextGenerator, store::DesignStore};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

/// Page dumps of large documents run to several megabytes.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, G> {
  pub store:     Arc<S>,
  pub generator: Arc<G>,
}

impl<S, G> AppState<S, G> {
  pub fn new(store: S, generator: G) -> Self {
    Self { store: Arc::new(store), generator: Arc::new(generator) }
  }
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), generator: self.generator.clone() }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router.
pub fn router<S, G>(state: AppState<S, G>) -> Router
where
  S: DesignStore + 'static,
  G: TextGenerator + 'static,
{
  Router::new()
    .route("/health", get(health))
    .route("/extract", post(extract::handler))
    .route("/analyze", post(analyze::handler::<S, G>))
    .route("/data", get(designs::data::<S, G>))
    .route("/list", get(designs::list::<S, G>))
    .route("/delete", post(designs::delete::<S, G>))
    .fallback(not_found)
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

/// `GET /health` → `{"status": "ok", "version": "<crate version>"}`
pub async fn health() -> Json<Value> {
  Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn not_found() -> impl IntoResponse {
  (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
