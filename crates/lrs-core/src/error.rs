//! Error types for `lrs-core`.

use thiserror::Error;

/// The stored preferences cannot produce a statement.
///
/// Fatal for every send until the preferences are corrected; retrying with the
/// same configuration always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  #[error(
    "no valid identity configuration present: set `email`, or both \
     `accountId` and `homepage`"
  )]
  NoIdentity,

  #[error("required preference `{0}` is not set")]
  MissingKey(&'static str),
}

/// A stage of the location lookup chain failed.
///
/// `Clone` so a single in-flight resolution can hand the same failure to every
/// statement build awaiting it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
  #[error("ip discovery failed: {0}")]
  IpLookup(String),

  #[error("ip discovery returned an empty body")]
  EmptyIp,

  #[error("geolocation request failed: {0}")]
  Geolocation(String),

  #[error("geolocation service rejected the lookup: {0}")]
  Rejected(String),

  #[error("geolocation response could not be parsed: {0}")]
  Unparseable(String),

  #[error("location resolution task ended before producing a result")]
  Aborted,
}

/// The statement could not be handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
  #[error("connection to the record store failed: {0}")]
  Connection(String),

  #[error("request to the record store timed out: {0}")]
  Timeout(String),

  #[error("record store answered {status}: {body}")]
  Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Configuration(#[from] ConfigurationError),

  #[error("location unavailable: {0}")]
  LocationUnavailable(#[from] LocationError),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
