//! Delivery of built statements to the record store.

use lrs_core::{
  DeliveryError, Result,
  statement::Statement,
  transport::{StatementTransport, TransportResponse},
};
use tracing::{debug, info, warn};

/// Outcome of one delivery attempt. Failures are values, not errors: a
/// rejected statement must not take the session down with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
  Delivered(TransportResponse),
  Failed(DeliveryError),
}

impl DeliveryReport {
  pub fn is_delivered(&self) -> bool { matches!(self, Self::Delivered(_)) }

  /// HTTP status, when the record store answered at all.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Delivered(response) => Some(response.status),
      Self::Failed(DeliveryError::Status { status, .. }) => Some(*status),
      Self::Failed(_) => None,
    }
  }
}

/// Serializes statements and hands them to a [`StatementTransport`]. Nothing
/// is retried, queued, or retained.
pub struct Dispatcher<T> {
  transport: T,
}

impl<T: StatementTransport> Dispatcher<T> {
  pub fn new(transport: T) -> Self { Self { transport } }

  /// Send `statement` once and report what happened.
  ///
  /// Only a statement that cannot be serialized is an `Err`.
  pub async fn send(&self, statement: &Statement) -> Result<DeliveryReport> {
    let body = statement.to_json()?;
    debug!(statement_id = %statement.id(), %body, "sending statement");

    let report = match self.transport.post_statements(body).await {
      Ok(response) if response.is_success() => {
        info!(
          statement_id = %statement.id(),
          status = response.status,
          body = %response.body,
          "statement delivered"
        );
        DeliveryReport::Delivered(response)
      }
      Ok(TransportResponse { status, body }) => {
        warn!(
          statement_id = %statement.id(),
          status,
          %body,
          "record store rejected statement"
        );
        DeliveryReport::Failed(DeliveryError::Status { status, body })
      }
      Err(error) => {
        warn!(
          statement_id = %statement.id(),
          %error,
          "statement delivery failed"
        );
        DeliveryReport::Failed(error)
      }
    };

    Ok(report)
  }
}
