//! xAPI statement model.
//!
//! A [`Statement`] is immutable once built: its fields are private, and the
//! only way to obtain one is [`Statement::new`] (or deserialization), which
//! stamps a fresh id and timestamp. Logically repeated events are therefore
//! always distinct statements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{identity::Identity, location::Location};

/// IRI prefix of the ADL verb vocabulary.
pub const ADL_VERB_PREFIX: &str = "http://adlnet.gov/expapi/verbs/";

/// Build an ADL verb IRI, e.g. `verb_id("completed")`.
pub fn verb_id(verb: &str) -> String { format!("{ADL_VERB_PREFIX}{verb}") }

// ─── Language map ────────────────────────────────────────────────────────────

/// A localised display string. Only `en-US` is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageMap {
  #[serde(rename = "en-US")]
  pub en_us: String,
}

impl LanguageMap {
  pub fn en_us(text: impl Into<String>) -> Self { Self { en_us: text.into() } }
}

// ─── Verb ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
  pub id:      String,
  pub display: LanguageMap,
}

impl Verb {
  pub fn new(id: impl Into<String>, display: impl Into<String>) -> Self {
    Self { id: id.into(), display: LanguageMap::en_us(display) }
  }

  pub fn initialized() -> Self { Self::new(verb_id("initialized"), "Initialized") }

  pub fn completed() -> Self { Self::new(verb_id("completed"), "Completed") }
}

// ─── Object ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
  #[default]
  Activity,
}

/// The activity acted upon: the application itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
  #[serde(default)]
  pub object_type: ActivityType,
  pub id:          String,
  pub definition:  ActivityDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDefinition {
  pub name:       LanguageMap,
  pub extensions: ObjectExtensions,
}

/// Device metadata attached to the activity definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectExtensions {
  pub vr_settings_metadata:  VrSettings,
  pub vr_subsystem_metadata: VrSubsystems,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VrSettings {
  /// Which VR device is loaded, empty when none.
  pub loaded_device_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrSubsystems {
  /// Whether VR is in use at all.
  pub running: bool,
}

// ─── Context ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub registration: Option<String>,
  pub platform:     String,
  pub extensions:   ContextExtensions,
}

/// Deployment metadata attached to the statement context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextExtensions {
  pub platform_settings_metadata: PlatformSettings,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:                   Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
  pub platform: String,
}

// ─── Statement ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
  id:        Uuid,
  actor:     Identity,
  verb:      Verb,
  object:    Activity,
  context:   Context,
  timestamp: DateTime<Utc>,
}

impl Statement {
  /// Assemble a statement with a fresh id, timestamped now.
  pub fn new(
    actor: Identity,
    verb: Verb,
    object: Activity,
    context: Context,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      actor,
      verb,
      object,
      context,
      timestamp: Utc::now(),
    }
  }

  pub fn id(&self) -> Uuid { self.id }

  pub fn actor(&self) -> &Identity { &self.actor }

  pub fn verb(&self) -> &Verb { &self.verb }

  pub fn object(&self) -> &Activity { &self.object }

  pub fn context(&self) -> &Context { &self.context }

  pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }

  /// The xAPI JSON document sent to the record store.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}
