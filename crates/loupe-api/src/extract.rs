//! `POST /extract`: run the signal extractor on a posted page.
//!
//! The body is either a page dump as a content script would post it, or raw
//! markup as `{"url": "...", "html": "..."}`.

use axum::{Json, extract::rejection::JsonRejection};
use loupe_extract::Page;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ExtractBody {
  Html { url: String, html: String },
  Page(Page),
}

impl ExtractBody {
  pub fn into_page(self) -> Page {
    match self {
      ExtractBody::Html { url, html } => Page::from_html(&url, &html),
      ExtractBody::Page(page) => page,
    }
  }
}

/// `POST /extract` → `{"success": true, "data": <snapshot>}`
pub async fn handler(
  payload: Result<Json<ExtractBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) = payload?;
  let page = body.into_page();
  let snapshot = loupe_extract::extract(&page);
  tracing::info!(
    url = %snapshot.url,
    styles = %snapshot.style_list(),
    "extracted snapshot"
  );
  Ok(Json(json!({ "success": true, "data": snapshot })))
}
