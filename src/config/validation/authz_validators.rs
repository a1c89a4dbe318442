//! Authorization, audit and logging validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl Validate for AuthzConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating authorization configuration");

        for (code, implied) in &self.implications {
            if !is_valid_code(code) {
                return Err(format!("Invalid permission code in implications: '{}'", code));
            }
            if implied.is_empty() {
                return Err(format!("Implication for {} must list at least one code", code));
            }
            if let Some(bad) = implied.iter().find(|c| !is_valid_code(c)) {
                return Err(format!(
                    "Invalid implied permission code '{}' under {}",
                    bad, code
                ));
            }
        }

        Ok(())
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("Audit page size must be greater than 0".to_string());
        }

        if self.page_size > 10_000 {
            return Err("Audit page size should not exceed 10000".to_string());
        }

        if self.record_retries > 10 {
            return Err("Audit record retries should not exceed 10".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        Ok(())
    }
}
