//! Capability checks, run once per command before any resolution work.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Outcome of a capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub reason: String,
}

impl Decision {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Access denied: {reason}")]
pub struct AccessDenied {
    pub reason: String,
}

pub trait CapabilityCheck {
    fn check(&self, collection: &str, action: Action) -> Decision;

    /// `check`, turned into a `Result`.
    fn authorize(&self, collection: &str, action: Action) -> Result<(), AccessDenied> {
        let decision = self.check(collection, action);
        if decision.allowed {
            log::debug!("{} {}: {}", action, collection, decision.reason);
            Ok(())
        } else {
            Err(AccessDenied {
                reason: decision.reason,
            })
        }
    }
}

/// Allows everything. Used when no access section is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CapabilityCheck for AllowAll {
    fn check(&self, _collection: &str, _action: Action) -> Decision {
        Decision::allow("access control disabled")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub collection: String,
    pub action: Action,
}

/// `access` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Admin flag plus explicit per-collection grants.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    config: AccessConfig,
}

impl PermissionTable {
    pub fn new(config: AccessConfig) -> Self {
        Self { config }
    }
}

impl CapabilityCheck for PermissionTable {
    fn check(&self, collection: &str, action: Action) -> Decision {
        if self.config.admin {
            return Decision::allow("admin");
        }
        let granted = self
            .config
            .permissions
            .iter()
            .any(|p| p.collection == collection && p.action == action);
        if granted {
            Decision::allow(format!("{} granted on {}", action, collection))
        } else {
            Decision::deny(format!("no {} permission on {}", action, collection))
        }
    }
}
