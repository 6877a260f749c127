//! Async HTTP client for the xAPI statements resource.

use std::time::Duration;

use anyhow::{Context, Result};
use lrs_core::{
  DeliveryError,
  transport::{StatementTransport, TransportResponse},
};
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

pub const XAPI_VERSION_HEADER: &str = "X-Experience-API-Version";
pub const XAPI_VERSION: &str = "1.0.3";

/// Record store endpoint and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LrsConfig {
  /// Base URL of the xAPI endpoint, e.g. `https://lrs.example.com/xapi`.
  pub endpoint:     String,
  pub key:          String,
  pub secret:       String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }

impl LrsConfig {
  pub fn new(
    endpoint: impl Into<String>,
    key: impl Into<String>,
    secret: impl Into<String>,
  ) -> Self {
    Self {
      endpoint:     endpoint.into(),
      key:          key.into(),
      secret:       secret.into(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

/// Posts statements to `{endpoint}/statements` with basic auth.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct LrsClient {
  client: Client,
  config: LrsConfig,
}

impl LrsClient {
  pub fn new(config: LrsConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn statements_url(&self) -> String {
    format!("{}/statements", self.config.endpoint.trim_end_matches('/'))
  }
}

impl StatementTransport for LrsClient {
  async fn post_statements(
    &self,
    body: String,
  ) -> Result<TransportResponse, DeliveryError> {
    let url = self.statements_url();
    debug!(%url, "POST statements");

    let resp = self
      .client
      .post(&url)
      .basic_auth(&self.config.key, Some(&self.config.secret))
      .header(XAPI_VERSION_HEADER, XAPI_VERSION)
      .header(CONTENT_TYPE, "application/json")
      .body(body)
      .send()
      .await
      .map_err(delivery_error)?;

    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(delivery_error)?;
    Ok(TransportResponse { status, body })
  }
}

fn delivery_error(e: reqwest::Error) -> DeliveryError {
  if e.is_timeout() {
    DeliveryError::Timeout(e.to_string())
  } else {
    DeliveryError::Connection(e.to_string())
  }
}
