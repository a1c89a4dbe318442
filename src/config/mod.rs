//! Configuration management
//!
//! This module handles loading, validation, and merging of all configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AuthzError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Settings document
    pub settings: Settings,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthzError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)
            .map_err(|e| AuthzError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { settings };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let settings = Settings::from_env()?;
        let config = Self { settings };

        config.validate()?;
        Ok(config)
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.settings.storage
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.settings.storage.database
    }

    /// Get authorization configuration
    pub fn authz(&self) -> &AuthzConfig {
        &self.settings.authz
    }

    /// Get audit configuration
    pub fn audit(&self) -> &AuditConfig {
        &self.settings.audit
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.settings.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.settings
            .storage
            .validate()
            .map_err(|e| AuthzError::Config(format!("Storage config error: {}", e)))?;

        self.settings
            .authz
            .validate()
            .map_err(|e| AuthzError::Config(format!("Authz config error: {}", e)))?;

        self.settings
            .audit
            .validate()
            .map_err(|e| AuthzError::Config(format!("Audit config error: {}", e)))?;

        self.settings
            .logging
            .validate()
            .map_err(|e| AuthzError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.settings = self.settings.merge(other.settings);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.settings)
            .map_err(|e| AuthzError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
