//! Audit ledger configuration

use super::*;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audit ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Default age in days used by retention cleanup
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Rows fetched per page by lazy queries
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Retries after a failed audit write
    #[serde(default = "default_record_retries")]
    pub record_retries: u32,
    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            page_size: default_page_size(),
            record_retries: default_record_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl AuditConfig {
    /// Merge audit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.retention_days != default_retention_days() {
            self.retention_days = other.retention_days;
        }
        if other.page_size != default_page_size() {
            self.page_size = other.page_size;
        }
        if other.record_retries != default_record_retries() {
            self.record_retries = other.record_retries;
        }
        if other.retry_base_delay_ms != default_retry_base_delay_ms() {
            self.retry_base_delay_ms = other.retry_base_delay_ms;
        }
        self
    }

    /// Retry settings for audit writes
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.record_retries + 1,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            ..Default::default()
        }
    }
}
