//! Top-level settings document

use super::*;
use serde::{Deserialize, Serialize};

/// Settings as stored in the YAML configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authorization configuration
    #[serde(default)]
    pub authz: AuthzConfig,
    /// Audit ledger configuration
    #[serde(default)]
    pub audit: AuditConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Create settings from environment variables
    ///
    /// Recognised: `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
    /// `AUDIT_RETENTION_DAYS`, `LOG_LEVEL`, `LOG_JSON`.
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut settings = Self::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            settings.storage.database.url = url;
        }
        if let Ok(value) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            settings.storage.database.max_connections = parse_env("DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Ok(value) = std::env::var("AUDIT_RETENTION_DAYS") {
            settings.audit.retention_days = parse_env("AUDIT_RETENTION_DAYS", &value)?;
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            settings.logging.level = level;
        }
        if let Ok(value) = std::env::var("LOG_JSON") {
            settings.logging.json = value == "1" || value.eq_ignore_ascii_case("true");
        }

        Ok(settings)
    }

    /// Merge two settings documents, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.storage = self.storage.merge(other.storage);
        self.authz = self.authz.merge(other.authz);
        self.audit = self.audit.merge(other.audit);
        self.logging = self.logging.merge(other.logging);
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> crate::utils::error::Result<T> {
    value.parse().map_err(|_| {
        crate::utils::error::AuthzError::Config(format!("Invalid value for {}: {}", name, value))
    })
}
