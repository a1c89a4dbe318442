//! Authorization configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authorization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Permission implication table: holding the key grants every listed code.
    ///
    /// Resolved transitively when a session opens. Empty unless configured.
    #[serde(default)]
    pub implications: BTreeMap<String, Vec<String>>,
    /// Install the default permission catalog and system roles at bootstrap
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Record LOGIN / LOGOUT entries in the audit ledger
    #[serde(default = "default_true")]
    pub audit_logins: bool,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            implications: BTreeMap::new(),
            seed_defaults: true,
            audit_logins: true,
        }
    }
}

impl AuthzConfig {
    /// Merge authorization configurations
    pub fn merge(mut self, other: Self) -> Self {
        for (code, implied) in other.implications {
            self.implications.insert(code, implied);
        }
        if !other.seed_defaults {
            self.seed_defaults = other.seed_defaults;
        }
        if !other.audit_logins {
            self.audit_logins = other.audit_logins;
        }
        self
    }
}
