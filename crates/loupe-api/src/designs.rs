//! Handlers over the collected table.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/data` | Row counts per table |
//! | `GET`  | `/list` | Records, newest first |
//! | `POST` | `/delete` | Body: `{"id": 3}` or `{"id": "3"}` |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use loupe_core::{
  generate::TextGenerator,
  record::Record,
  store::{DeleteOutcome, DesignStore, TableCounts},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

// ─── Data ────────────────────────────────────────────────────────────────────

/// `GET /data` → `{"collected-designs": 3, "colors": 0, …}`
pub async fn data<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<TableCounts>, ApiError>
where
  S: DesignStore,
  G: TextGenerator,
{
  let counts = state.store.table_counts().await.map_err(ApiError::store)?;
  Ok(Json(counts))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub success: bool,
  pub designs: Vec<Record>,
}

/// `GET /list`
pub async fn list<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: DesignStore,
  G: TextGenerator,
{
  let designs = state.store.list().await.map_err(ApiError::store)?;
  Ok(Json(ListResponse { success: true, designs }))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// A record id as posted: extensions send numbers, other clients strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DesignId {
  Number(serde_json::Number),
  Text(String),
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

impl std::fmt::Display for DesignId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      // `1.0` names row `1`.
      DesignId::Number(n) if n.is_f64() => match n.as_f64() {
        Some(v) if v.fract() == 0.0 && v.abs() <= MAX_EXACT_FLOAT => write!(f, "{}", v as i64),
        _ => n.fmt(f),
      },
      DesignId::Number(n) => n.fmt(f),
      DesignId::Text(s) => f.write_str(s.trim()),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  pub id: DesignId,
}

/// `POST /delete`
pub async fn delete<S, G>(
  State(state): State<AppState<S, G>>,
  payload: Result<Json<DeleteBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: DesignStore,
  G: TextGenerator,
{
  let Json(body) = payload?;
  let id = body.id.to_string();
  let outcome = state.store.delete(&id).await.map_err(ApiError::store)?;

  Ok(Json(match outcome {
    DeleteOutcome::NoDataFile => json!({ "success": false, "error": "No data file" }),
    DeleteOutcome::Removed | DeleteOutcome::NotFound => json!({ "success": true }),
  }))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn id(value: serde_json::Value) -> String {
    serde_json::from_value::<DesignId>(value).unwrap().to_string()
  }

  #[test]
  fn ids_render_as_stored() {
    assert_eq!(id(serde_json::json!(3)), "3");
    assert_eq!(id(serde_json::json!(3.0)), "3");
    assert_eq!(id(serde_json::json!(-0.0)), "0");
    assert_eq!(id(serde_json::json!(2.5)), "2.5");
    assert_eq!(id(serde_json::json!(" 7 ")), "7");
  }
}
