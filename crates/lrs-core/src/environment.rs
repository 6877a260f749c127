//! Runtime environment introspection.

use serde::Deserialize;

/// Read-only facts about where the application is running.
///
/// Infallible by contract: unknown values are empty / `false`.
pub trait Environment: Send + Sync {
  /// Deployment platform name (e.g. `"linux"`, `"Android"`).
  fn platform(&self) -> String;
  /// Name of the loaded VR device, empty when none.
  fn vr_device_name(&self) -> String;
  /// Whether a VR device is active.
  fn vr_present(&self) -> bool;
}

/// An [`Environment`] whose answers are fixed at construction, typically
/// from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaticEnvironment {
  pub platform:       String,
  pub vr_device_name: String,
  pub vr_present:     bool,
}

impl Default for StaticEnvironment {
  fn default() -> Self {
    Self {
      platform:       std::env::consts::OS.to_string(),
      vr_device_name: String::new(),
      vr_present:     false,
    }
  }
}

impl Environment for StaticEnvironment {
  fn platform(&self) -> String { self.platform.clone() }

  fn vr_device_name(&self) -> String { self.vr_device_name.clone() }

  fn vr_present(&self) -> bool { self.vr_present }
}
