//! The record store transport boundary.

use std::future::Future;

use crate::error::DeliveryError;

/// What the record store answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
  pub status: u16,
  pub body:   String,
}

impl TransportResponse {
  pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// Hands serialized statements to a record store.
///
/// A non-2xx answer is still `Ok`: the transport reports what happened and
/// the dispatcher decides what it means. `Err` is reserved for requests that
/// never got an answer (connection failure, timeout).
pub trait StatementTransport: Send + Sync {
  fn post_statements(
    &self,
    body: String,
  ) -> impl Future<Output = Result<TransportResponse, DeliveryError>> + Send + '_;
}
