//! Layered configuration for the `lrs` binary.

use std::path::Path;

use anyhow::{Context, Result};
use lrs_core::{
  environment::StaticEnvironment,
  preferences::{PreferenceStore, keys},
};
use lrs_http::{LrsConfig, ServiceUrls};
use serde::Deserialize;

/// Everything the binary reads from `lrs.toml` and `LRS_*` variables.
#[derive(Debug, Deserialize)]
pub struct Settings {
  pub store:       LrsConfig,
  #[serde(default)]
  pub services:    ServiceUrls,
  #[serde(default)]
  pub environment: StaticEnvironment,
  #[serde(default)]
  pub preferences: PreferenceFile,
}

impl Settings {
  /// Read `path` (optional) overlaid with environment variables such as
  /// `LRS_STORE__SECRET` or `LRS_PREFERENCES__GAME_ID`.
  pub fn load(path: &Path) -> Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("LRS")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

/// The `[preferences]` table, served to the publisher as its preference
/// store.
///
/// Config keys are case-insensitive, so the table uses snake_case names and
/// maps them onto the publisher's camelCase keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceFile {
  pub email:                Option<String>,
  pub account_id:           Option<String>,
  pub homepage:             Option<String>,
  pub display_name:         Option<String>,
  pub game_id:              Option<String>,
  pub game_display:         Option<String>,
  pub session_identifier:   Option<String>,
  pub enable_user_location: Option<bool>,
}

impl PreferenceStore for PreferenceFile {
  fn get(&self, key: &str) -> Option<String> {
    match key {
      keys::EMAIL => self.email.clone(),
      keys::ACCOUNT_ID => self.account_id.clone(),
      keys::HOMEPAGE => self.homepage.clone(),
      keys::DISPLAY_NAME => self.display_name.clone(),
      keys::GAME_ID => self.game_id.clone(),
      keys::GAME_DISPLAY => self.game_display.clone(),
      keys::SESSION_IDENTIFIER => self.session_identifier.clone(),
      keys::ENABLE_USER_LOCATION => {
        self.enable_user_location.map(|b| b.to_string())
      }
      _ => None,
    }
  }
}
