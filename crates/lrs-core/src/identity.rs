//! Actor identity and the policy that derives it from preferences.

use serde::{Deserialize, Serialize};

use crate::{error::ConfigurationError, preferences::Preferences};

/// Scheme marker prepended to email addresses to form an xAPI `mbox`.
pub const MBOX_SCHEME: &str = "mailto:";

/// The actor of a statement.
///
/// Exactly one identifying scheme is carried. On the wire both variants are an
/// xAPI `Agent`; the variant is recovered from which of `mbox` / `account` is
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AgentWire", try_from = "AgentWire")]
pub enum Identity {
  /// A contact-method identifier (`mailto:` IRI).
  Email { mbox: String, name: String },
  /// A federated account on some system identified by its homepage.
  Account {
    account_id: String,
    homepage:   String,
    name:       String,
  },
}

impl Identity {
  /// Build an email identity, adding the `mailto:` scheme unless `address`
  /// already carries it.
  pub fn email(address: &str, name: impl Into<String>) -> Self {
    let address = address.trim();
    let mbox = if address.starts_with(MBOX_SCHEME) {
      address.to_string()
    } else {
      format!("{MBOX_SCHEME}{address}")
    };
    Self::Email { mbox, name: name.into() }
  }

  pub fn account(
    account_id: impl Into<String>,
    homepage: impl Into<String>,
    name: impl Into<String>,
  ) -> Self {
    Self::Account {
      account_id: account_id.into(),
      homepage:   homepage.into(),
      name:       name.into(),
    }
  }

  /// The display name, whichever scheme is in use.
  pub fn name(&self) -> &str {
    match self {
      Self::Email { name, .. } | Self::Account { name, .. } => name,
    }
  }
}

/// Derive the actor from `prefs`. First match wins:
///
/// 1. an `email` credential → [`Identity::Email`];
/// 2. both `accountId` and `homepage` → [`Identity::Account`];
/// 3. otherwise [`ConfigurationError::NoIdentity`].
///
/// Blank values count as unset. Not cached: preferences may change between
/// calls within a session.
pub fn resolve(prefs: &Preferences) -> Result<Identity, ConfigurationError> {
  let name = prefs.display_name();

  if let Some(email) = non_blank(&prefs.email) {
    return Ok(Identity::email(email, name));
  }

  match (non_blank(&prefs.account_id), non_blank(&prefs.homepage)) {
    (Some(account_id), Some(homepage)) => {
      Ok(Identity::account(account_id, homepage, name))
    }
    _ => Err(ConfigurationError::NoIdentity),
  }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.trim().is_empty())
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentWire {
  #[serde(default = "agent_object_type")]
  object_type: String,
  #[serde(default)]
  name:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  mbox:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  account:     Option<AccountWire>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountWire {
  home_page: String,
  name:      String,
}

fn agent_object_type() -> String { "Agent".to_string() }

impl From<Identity> for AgentWire {
  fn from(identity: Identity) -> Self {
    match identity {
      Identity::Email { mbox, name } => Self {
        object_type: agent_object_type(),
        name,
        mbox: Some(mbox),
        account: None,
      },
      Identity::Account { account_id, homepage, name } => Self {
        object_type: agent_object_type(),
        name,
        mbox: None,
        account: Some(AccountWire { home_page: homepage, name: account_id }),
      },
    }
  }
}

impl TryFrom<AgentWire> for Identity {
  type Error = String;

  fn try_from(wire: AgentWire) -> Result<Self, Self::Error> {
    match (wire.mbox, wire.account) {
      (Some(mbox), _) => Ok(Self::Email { mbox, name: wire.name }),
      (None, Some(account)) => Ok(Self::Account {
        account_id: account.name,
        homepage:   account.home_page,
        name:       wire.name,
      }),
      (None, None) => {
        Err("agent carries neither `mbox` nor `account`".to_string())
      }
    }
  }
}
