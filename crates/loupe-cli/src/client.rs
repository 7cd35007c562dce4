//! Async HTTP client wrapping the loupe JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use loupe_core::{record::Record, snapshot::DesignSnapshot, store::TableCounts};
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

/// Connection settings for the loupe API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the loupe JSON API.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReply {
  pub analysis: Option<String>,
  #[serde(default)]
  pub saved_to: Vec<String>,
  pub note:     Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListReply {
  designs: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct StatusReply {
  success: bool,
  error:   Option<String>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    // Generous: /analyze waits on the generator.
    let client = Client::builder()
      .timeout(Duration::from_secs(120))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /health`
  pub async fn health(&self) -> Result<Value> {
    let resp = self
      .client
      .get(self.url("/health"))
      .send()
      .await
      .context("GET /health failed")?;
    read(resp, "GET /health").await
  }

  /// `POST /analyze`
  pub async fn analyze(&self, snapshot: &DesignSnapshot) -> Result<AnalyzeReply> {
    tracing::debug!(url = %snapshot.url, "submitting snapshot");
    let resp = self
      .client
      .post(self.url("/analyze"))
      .json(snapshot)
      .send()
      .await
      .context("POST /analyze failed")?;
    read(resp, "POST /analyze").await
  }

  /// `GET /list`
  pub async fn list(&self) -> Result<Vec<Record>> {
    let resp = self
      .client
      .get(self.url("/list"))
      .send()
      .await
      .context("GET /list failed")?;
    let reply: ListReply = read(resp, "GET /list").await?;
    Ok(reply.designs)
  }

  /// `POST /delete`. Numeric ids are sent as JSON numbers.
  pub async fn delete(&self, id: &str) -> Result<()> {
    let body = match id.trim().parse::<u64>() {
      Ok(n) => json!({ "id": n }),
      Err(_) => json!({ "id": id }),
    };
    let resp = self
      .client
      .post(self.url("/delete"))
      .json(&body)
      .send()
      .await
      .context("POST /delete failed")?;
    let reply: StatusReply = read(resp, "POST /delete").await?;
    if !reply.success {
      return Err(anyhow!(
        "POST /delete → {}",
        reply.error.unwrap_or_else(|| "unknown error".into())
      ));
    }
    Ok(())
  }

  /// `GET /data`
  pub async fn stats(&self) -> Result<TableCounts> {
    let resp = self
      .client
      .get(self.url("/data"))
      .send()
      .await
      .context("GET /data failed")?;
    read(resp, "GET /data").await
  }
}

/// Decode a JSON body, surfacing the server's `error` field on failure.
async fn read<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let detail = resp
      .json::<Value>()
      .await
      .ok()
      .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
      .unwrap_or_default();
    return Err(anyhow!("{what} → {status} {detail}"));
  }
  resp.json().await.with_context(|| format!("deserialising {what} response"))
}
