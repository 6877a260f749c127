//! The preference store boundary and the snapshot read from it.
//!
//! The embedding application owns a key-value store (player preferences, a
//! config file, ...). The publisher never reads it piecemeal: every operation
//! takes one [`Preferences`] snapshot and works from that.

use std::collections::{BTreeMap, HashMap};

use crate::{
  error::ConfigurationError,
  identity::{self, Identity},
};

/// Recognised preference keys.
pub mod keys {
  pub const EMAIL: &str = "email";
  pub const ACCOUNT_ID: &str = "accountId";
  pub const HOMEPAGE: &str = "homepage";
  pub const DISPLAY_NAME: &str = "displayName";
  pub const GAME_ID: &str = "gameId";
  pub const GAME_DISPLAY: &str = "gameDisplay";
  pub const SESSION_IDENTIFIER: &str = "sessionIdentifier";
  pub const ENABLE_USER_LOCATION: &str = "enableUserLocation";
}

// ─── Store trait ─────────────────────────────────────────────────────────────

/// Read-only view of an external key-value preference store.
///
/// `None` means the key is absent; `Some("")` means it is present but empty.
pub trait PreferenceStore: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
}

impl PreferenceStore for HashMap<String, String> {
  fn get(&self, key: &str) -> Option<String> { HashMap::get(self, key).cloned() }
}

impl PreferenceStore for BTreeMap<String, String> {
  fn get(&self, key: &str) -> Option<String> { BTreeMap::get(self, key).cloned() }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Every recognised preference, read once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
  pub email:                Option<String>,
  pub account_id:           Option<String>,
  pub homepage:             Option<String>,
  pub display_name:         Option<String>,
  pub game_id:              Option<String>,
  pub game_display:         Option<String>,
  pub session_identifier:   Option<String>,
  pub enable_user_location: bool,
}

impl Preferences {
  /// Read all recognised keys from `store`.
  pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
    Self {
      email:                store.get(keys::EMAIL),
      account_id:           store.get(keys::ACCOUNT_ID),
      homepage:             store.get(keys::HOMEPAGE),
      display_name:         store.get(keys::DISPLAY_NAME),
      game_id:              store.get(keys::GAME_ID),
      game_display:         store.get(keys::GAME_DISPLAY),
      session_identifier:   store.get(keys::SESSION_IDENTIFIER),
      enable_user_location: store
        .get(keys::ENABLE_USER_LOCATION)
        .is_some_and(|v| is_truthy(&v)),
    }
  }

  /// Resolve the actor for statements built from this snapshot.
  pub fn identity(&self) -> Result<Identity, ConfigurationError> {
    identity::resolve(self)
  }

  /// The activity id. Required: a statement without an object is invalid.
  pub fn game_id(&self) -> Result<&str, ConfigurationError> {
    self
      .game_id
      .as_deref()
      .filter(|id| !id.trim().is_empty())
      .ok_or(ConfigurationError::MissingKey(keys::GAME_ID))
  }

  /// The activity display name, falling back to the activity id.
  pub fn game_display(&self) -> Option<&str> {
    self.game_display.as_deref().or(self.game_id.as_deref())
  }

  pub fn display_name(&self) -> &str { self.display_name.as_deref().unwrap_or_default() }

  pub fn registration(&self) -> Option<&str> {
    self.session_identifier.as_deref().filter(|s| !s.is_empty())
  }
}

fn is_truthy(value: &str) -> bool {
  matches!(
    value.trim().to_ascii_lowercase().as_str(),
    "true" | "1" | "yes" | "on"
  )
}
