//! Statement assembly.

use std::sync::Arc;

use lrs_core::{
  Result,
  environment::Environment,
  identity::Identity,
  location::LocationService,
  statement::{
    Activity, ActivityDefinition, ActivityType, Context, ContextExtensions,
    LanguageMap, ObjectExtensions, PlatformSettings, Statement, Verb,
    VrSettings, VrSubsystems,
  },
};

use crate::location::LocationResolver;

/// Everything about a statement except its verb: who did it, to what, and in
/// which session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementParts {
  pub actor:          Identity,
  pub object_id:      String,
  pub object_display: String,
  pub registration:   Option<String>,
}

/// Combines identity, environment metadata, and (optionally) the resolved
/// location into complete statements.
pub struct StatementBuilder<E, L> {
  environment: Arc<E>,
  location:    LocationResolver<L>,
}

impl<E, L> StatementBuilder<E, L>
where
  E: Environment,
  L: LocationService + 'static,
{
  pub fn new(environment: Arc<E>, location: LocationResolver<L>) -> Self {
    Self { environment, location }
  }

  pub fn location(&self) -> &LocationResolver<L> { &self.location }

  /// Build a statement for `verb`.
  ///
  /// With `with_location` set, the shared location resolution is awaited and
  /// attached to the context extensions; if it failed, so does the build and
  /// no statement is returned.
  pub async fn build(
    &self,
    verb: Verb,
    parts: StatementParts,
    with_location: bool,
  ) -> Result<Statement> {
    let mut context_extensions = ContextExtensions {
      platform_settings_metadata: PlatformSettings {
        platform: self.environment.platform(),
      },
      location:                   None,
    };

    let object_extensions = ObjectExtensions {
      vr_settings_metadata:  VrSettings {
        loaded_device_name: self.environment.vr_device_name(),
      },
      vr_subsystem_metadata: VrSubsystems {
        running: self.environment.vr_present(),
      },
    };

    if with_location {
      context_extensions.location = Some(self.location.get().await?);
    }

    let StatementParts { actor, object_id, object_display, registration } =
      parts;

    Ok(Statement::new(
      actor,
      verb,
      Activity {
        object_type: ActivityType::Activity,
        id:          object_id.clone(),
        definition:  ActivityDefinition {
          name:       LanguageMap::en_us(object_display),
          extensions: object_extensions,
        },
      },
      Context {
        registration,
        platform: object_id,
        extensions: context_extensions,
      },
    ))
  }

  /// An `initialized` statement.
  pub async fn started(
    &self,
    parts: StatementParts,
    with_location: bool,
  ) -> Result<Statement> {
    self.build(Verb::initialized(), parts, with_location).await
  }

  /// A `completed` statement.
  pub async fn completed(
    &self,
    parts: StatementParts,
    with_location: bool,
  ) -> Result<Statement> {
    self.build(Verb::completed(), parts, with_location).await
  }
}
