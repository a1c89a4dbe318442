//! Wiring of the authorization components

use crate::config::Config;
use crate::storage::StorageLayer;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::error::{Result, RetryPolicy};
use std::sync::Arc;
use tracing::info;

use super::admin::{PolicyAdmin, PolicyGuard};
use super::audit::{AuditLedger, DatabaseAuditLedger};
use super::catalog::{self, BootstrapReport, PermissionCatalog};
use super::directory::DatabaseUserDirectory;
use super::roles::RoleStore;
use super::session::{ImplicationTable, SessionManager, SessionOpener};

/// Every authorization component, sharing one database and one clock
#[derive(Debug, Clone)]
pub struct AuthzSystem {
    pub storage: StorageLayer,
    pub catalog: PermissionCatalog,
    pub roles: RoleStore,
    pub directory: Arc<DatabaseUserDirectory>,
    pub ledger: Arc<DatabaseAuditLedger>,
    pub admin: PolicyAdmin,
    pub sessions: Arc<SessionManager>,
    pub clock: Arc<dyn Clock>,
}

impl AuthzSystem {
    /// Connect, migrate and bootstrap using the system clock
    pub async fn start(config: &Config) -> Result<(Self, BootstrapReport)> {
        Self::start_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Connect, migrate and bootstrap with an injected clock
    pub async fn start_with_clock(
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, BootstrapReport)> {
        info!("Initializing authorization system");

        let storage = StorageLayer::new(config.storage()).await?;
        storage.migrate().await?;
        let report = catalog::bootstrap(&storage.database, clock.as_ref(), config.authz()).await?;

        let system = Self::new(config, storage, clock);
        info!("Authorization system initialized successfully");
        Ok((system, report))
    }

    /// Assemble the components over an already prepared storage layer
    pub fn new(config: &Config, storage: StorageLayer, clock: Arc<dyn Clock>) -> Self {
        let db = storage.db();

        let directory = Arc::new(DatabaseUserDirectory::new(db.clone(), clock.clone()));
        let ledger = Arc::new(DatabaseAuditLedger::new(
            db.clone(),
            clock.clone(),
            config.audit().page_size,
        ));
        let roles = RoleStore::new(db.clone(), directory.clone(), clock.clone());

        let guard = PolicyGuard::new(
            ledger.clone(),
            RetryPolicy::new(config.audit().retry_config()),
        );
        let admin = PolicyAdmin::new(roles.clone(), directory.clone(), guard, clock.clone());

        let opener = SessionOpener::new(
            roles.clone(),
            ImplicationTable::from_config(config.authz()),
            clock.clone(),
        );
        let sessions = Arc::new(SessionManager::new(
            opener,
            ledger.clone() as Arc<dyn AuditLedger>,
            config.authz().audit_logins,
        ));

        Self {
            storage,
            catalog: PermissionCatalog::new(db),
            roles,
            directory,
            ledger,
            admin,
            sessions,
            clock,
        }
    }
}
