//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite database.

use chrono::{DateTime, TimeZone, Utc};
use institute_authz::authz::catalog::codes;
use institute_authz::config::{AuthzConfig, DatabaseConfig};
use institute_authz::storage::StorageLayer;
use institute_authz::storage::database::Database;
use institute_authz::utils::clock::ManualClock;
use institute_authz::{AuthenticatedUser, AuthzSession, AuthzSystem, Config};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Migrated in-memory database without any seeded data
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database
    pub async fn new() -> Self {
        let db = Database::new(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }
}

/// Start of every test clock: Monday 2025-01-06 09:00 UTC
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap()
}

/// Configuration pointing at an in-memory database
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.settings.storage.database = DatabaseConfig::in_memory();
    config.settings.audit.retry_base_delay_ms = 1;
    config
}

/// Fully bootstrapped system driven by a manual clock
pub struct TestSystem {
    pub authz: AuthzSystem,
    pub clock: Arc<ManualClock>,
}

impl TestSystem {
    /// Default catalog, no implications
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Default catalog plus the given implication edges
    pub async fn with_implications(edges: &[(&str, &[&str])]) -> Self {
        let implications: BTreeMap<String, Vec<String>> = edges
            .iter()
            .map(|(code, implied)| {
                (
                    code.to_string(),
                    implied.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();

        let mut config = test_config();
        config.settings.authz = AuthzConfig {
            implications,
            ..AuthzConfig::default()
        };
        Self::with_config(config).await
    }

    pub async fn with_config(config: Config) -> Self {
        let clock = Arc::new(ManualClock::new(test_epoch()));
        let (authz, _report) = AuthzSystem::start_with_clock(&config, clock.clone())
            .await
            .expect("Failed to start authorization system");
        Self { authz, clock }
    }

    /// Bootstrapped storage without the component wiring
    pub fn storage(&self) -> &StorageLayer {
        &self.authz.storage
    }

    /// Log in as a fresh account holding `role_code`
    pub async fn login_as(&self, username: &str, role_code: &str) -> Arc<AuthzSession> {
        let role = self
            .authz
            .roles
            .get_by_code(role_code)
            .await
            .expect("role should exist");
        let account = self
            .authz
            .directory
            .create_user(username, Some(role.id))
            .await
            .expect("Failed to create user");

        self.authz
            .sessions
            .login(AuthenticatedUser::new(account.id, account.username, role.code))
            .await
            .expect("login should succeed")
    }

    pub async fn login_admin(&self) -> Arc<AuthzSession> {
        self.login_as("admin", codes::roles::ADMIN).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_system_is_bootstrapped() {
        let system = TestSystem::new().await;
        let stats = system.storage().db().stats().await.unwrap();
        assert!(stats.permissions > 0);
        assert!(stats.roles >= 6);
    }
}
