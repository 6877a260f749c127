//! IP discovery and IP geolocation over HTTP.

use std::time::Duration;

use anyhow::{Context, Result};
use lrs_core::{
  LocationError,
  location::{Location, LocationService},
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Placeholder in [`ServiceUrls::geo_url`] replaced by the discovered IP.
const IP_PLACEHOLDER: &str = "{ip}";

/// Where the two lookups go.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceUrls {
  /// Answers a plain GET with the caller's IP as the body.
  pub ip_url:  String,
  /// JSON geolocation endpoint; `{ip}` is substituted.
  pub geo_url: String,
}

impl Default for ServiceUrls {
  fn default() -> Self {
    Self {
      ip_url:  "http://canhazip.com".to_string(),
      geo_url: "http://ip-api.com/json/{ip}".to_string(),
    }
  }
}

/// ip-api style envelope: `status` is `"fail"` with a `message` when the
/// lookup was refused, otherwise the location fields sit alongside it.
#[derive(Deserialize)]
struct GeoResponse {
  #[serde(default)]
  status:   Option<String>,
  #[serde(default)]
  message:  Option<String>,
  #[serde(flatten)]
  location: Location,
}

#[derive(Clone)]
pub struct HttpLocationService {
  client: Client,
  urls:   ServiceUrls,
}

impl HttpLocationService {
  pub fn new(urls: ServiceUrls) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, urls })
  }

  async fn get_text(&self, url: &str) -> Result<String, String> {
    let resp = self.client.get(url).send().await.map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
      return Err(format!("GET {url} → {}", resp.status()));
    }
    resp.text().await.map_err(|e| e.to_string())
  }
}

impl LocationService for HttpLocationService {
  async fn public_ip(&self) -> Result<String, LocationError> {
    debug!(url = %self.urls.ip_url, "discovering public ip");
    let body = self
      .get_text(&self.urls.ip_url)
      .await
      .map_err(LocationError::IpLookup)?;

    let ip = body.trim();
    if ip.is_empty() {
      return Err(LocationError::EmptyIp);
    }
    Ok(ip.to_string())
  }

  async fn geolocate(&self, ip: &str) -> Result<Location, LocationError> {
    let url = self.urls.geo_url.replace(IP_PLACEHOLDER, ip);
    debug!(%url, "geolocating");
    let body = self
      .get_text(&url)
      .await
      .map_err(LocationError::Geolocation)?;

    let parsed: GeoResponse = serde_json::from_str(&body)
      .map_err(|e| LocationError::Unparseable(e.to_string()))?;

    if parsed.status.as_deref() == Some("fail") {
      return Err(LocationError::Rejected(
        parsed.message.unwrap_or_else(|| "no reason given".to_string()),
      ));
    }
    Ok(parsed.location)
  }
}
