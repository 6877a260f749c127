//! Geographic location and the lookup service boundary.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// Approximate location of the caller, as reported by an IP geolocation
/// service. Every field is optional: the service decides what it knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country_code: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub region:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub region_name:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub city:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub zip:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lat:          Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lon:          Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timezone:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub isp:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub org:          Option<String>,
  /// Autonomous system, e.g. `"AS15169 Google LLC"`.
  #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
  pub autonomous_system: Option<String>,
  /// The IP address the lookup was performed for.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub query:        Option<String>,
}

/// The two-stage external lookup: discover our public IP, then geolocate it.
///
/// Implemented over HTTP by `lrs-http`; tests substitute deterministic mocks.
pub trait LocationService: Send + Sync {
  /// Ask a "what is my IP" service for the caller's public address.
  fn public_ip(
    &self,
  ) -> impl Future<Output = Result<String, LocationError>> + Send + '_;

  /// Resolve `ip` to a [`Location`].
  fn geolocate<'a>(
    &'a self,
    ip: &'a str,
  ) -> impl Future<Output = Result<Location, LocationError>> + Send + 'a;
}
