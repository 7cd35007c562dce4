//! `POST /analyze`: the submission pipeline.
//!
//! Snapshot → prompt → generator (one attempt) → normalise → create record.
//! A generator failure is never fatal: the record is saved from fallbacks
//! alone and the response carries a note instead of the analysis text.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use chrono::{NaiveDate, Utc};
use loupe_core::{
  analysis::AnalysisFields,
  generate::TextGenerator,
  record::NewRecord,
  snapshot::DesignSnapshot,
  store::{CreateOutcome, DesignStore},
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Note attached to a response whose record was saved without analysis.
pub const SKIPPED_NOTE: &str = "Saved raw data (analysis skipped)";

/// What one submission produced.
#[derive(Debug)]
pub struct Submission {
  /// Raw generator text; `None` when the generator failed.
  pub analysis: Option<String>,
  pub fields:   AnalysisFields,
  pub outcome:  CreateOutcome,
}

/// Run the pipeline for `snapshot`, dating the record `date`.
pub async fn submit<S, G>(
  store: &S,
  generator: &G,
  snapshot: &DesignSnapshot,
  date: NaiveDate,
) -> Result<Submission, S::Error>
where
  S: DesignStore,
  G: TextGenerator,
{
  let prompt = loupe_analysis::build_prompt(snapshot);
  let analysis = match generator.generate(&prompt).await {
    Ok(text) => Some(text),
    Err(e) => {
      tracing::warn!(url = %snapshot.url, error = %e, "analysis skipped, saving raw data");
      None
    }
  };

  let fields = loupe_analysis::normalize(snapshot, analysis.as_deref());
  let outcome = store
    .create(NewRecord {
      date,
      source: snapshot.url.clone(),
      fields: fields.clone(),
    })
    .await?;

  Ok(Submission { analysis, fields, outcome })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
  pub success:  bool,
  pub analysis: Option<String>,
  pub fields:   AnalysisFields,
  pub saved_to: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub note:     Option<&'static str>,
}

/// `POST /analyze`: body: a design snapshot.
pub async fn handler<S, G>(
  State(state): State<AppState<S, G>>,
  payload: Result<Json<DesignSnapshot>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError>
where
  S: DesignStore,
  G: TextGenerator,
{
  let Json(snapshot) = payload?;
  tracing::info!(url = %snapshot.url, "analyzing");

  let today = Utc::now().date_naive();
  let submission = submit(&*state.store, &*state.generator, &snapshot, today)
    .await
    .map_err(ApiError::store)?;

  let note = submission.analysis.is_none().then_some(SKIPPED_NOTE);
  Ok(Json(AnalyzeResponse {
    success: true,
    saved_to: submission.outcome.saved_to(),
    analysis: submission.analysis,
    fields: submission.fields,
    note,
  }))
}
