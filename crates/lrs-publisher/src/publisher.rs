//! The publisher facade used by embedding applications.

use std::sync::Arc;

use lrs_core::{
  Result,
  environment::Environment,
  location::LocationService,
  preferences::{PreferenceStore, Preferences},
  statement::{Statement, Verb},
  transport::StatementTransport,
};
use tracing::warn;

use crate::{
  builder::{StatementBuilder, StatementParts},
  cache::LocationCache,
  dispatcher::{DeliveryReport, Dispatcher},
  location::LocationResolver,
};

/// Builds statements from the current preferences and sends them.
///
/// Constructing a publisher starts location resolution in the background, so
/// construct it inside a tokio runtime and early in the session.
pub struct Publisher<T, L, E, P> {
  preferences: P,
  builder:     StatementBuilder<E, L>,
  dispatcher:  Dispatcher<T>,
}

impl<T, L, E, P> Publisher<T, L, E, P>
where
  T: StatementTransport,
  L: LocationService + 'static,
  E: Environment,
  P: PreferenceStore,
{
  /// A publisher sharing the process-wide [`LocationCache`].
  pub fn new(transport: T, location: L, environment: E, preferences: P) -> Self {
    Self::with_cache(
      transport,
      location,
      environment,
      preferences,
      LocationCache::global(),
    )
  }

  pub fn with_cache(
    transport: T,
    location: L,
    environment: E,
    preferences: P,
    cache: Arc<LocationCache>,
  ) -> Self {
    let resolver = LocationResolver::new(Arc::new(location), cache);
    Self {
      preferences,
      builder: StatementBuilder::new(Arc::new(environment), resolver),
      dispatcher: Dispatcher::new(transport),
    }
  }

  pub fn builder(&self) -> &StatementBuilder<E, L> { &self.builder }

  /// Snapshot the preference store.
  pub fn preferences(&self) -> Preferences { Preferences::load(&self.preferences) }

  // ── Building ──────────────────────────────────────────────────────────

  /// Build a statement for `verb` from the current preferences.
  pub async fn statement(&self, verb: Verb) -> Result<Statement> {
    let prefs = self.preferences();
    let parts = parts_from(&prefs)?;
    self.builder.build(verb, parts, prefs.enable_user_location).await
  }

  pub async fn started_statement(&self) -> Result<Statement> {
    self.statement(Verb::initialized()).await
  }

  pub async fn completed_statement(&self) -> Result<Statement> {
    self.statement(Verb::completed()).await
  }

  // ── Sending ───────────────────────────────────────────────────────────

  pub async fn send_started(&self) -> Result<DeliveryReport> {
    self.send_verb(Verb::initialized()).await
  }

  pub async fn send_completed(&self) -> Result<DeliveryReport> {
    self.send_verb(Verb::completed()).await
  }

  /// Send a statement with an arbitrary verb about the configured activity.
  pub async fn send_statement(
    &self,
    verb_id: &str,
    verb_display: &str,
  ) -> Result<DeliveryReport> {
    self.send_verb(Verb::new(verb_id, verb_display)).await
  }

  /// Send a statement whose actor, object, and registration are supplied by
  /// the caller instead of the preferences. Location is still gated by
  /// `enableUserLocation`.
  pub async fn send_custom(
    &self,
    verb_id: &str,
    verb_display: &str,
    parts: StatementParts,
  ) -> Result<DeliveryReport> {
    let with_location = self.preferences().enable_user_location;
    let statement = self
      .builder
      .build(Verb::new(verb_id, verb_display), parts, with_location)
      .await?;
    self.dispatcher.send(&statement).await
  }

  /// Send a statement built elsewhere, unchanged.
  pub async fn send_prebuilt(
    &self,
    statement: &Statement,
  ) -> Result<DeliveryReport> {
    self.dispatcher.send(statement).await
  }

  async fn send_verb(&self, verb: Verb) -> Result<DeliveryReport> {
    let statement = self.statement(verb).await.inspect_err(|e| {
      warn!(error = %e, "statement not built; nothing sent");
    })?;
    self.dispatcher.send(&statement).await
  }
}

fn parts_from(prefs: &Preferences) -> Result<StatementParts> {
  let actor = prefs.identity()?;
  let object_id = prefs.game_id()?.to_string();
  let object_display = prefs
    .game_display()
    .unwrap_or(object_id.as_str())
    .to_string();

  Ok(StatementParts {
    actor,
    object_display,
    object_id,
    registration: prefs.registration().map(str::to_string),
  })
}
