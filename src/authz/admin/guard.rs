//! Permission check followed by exactly one audit record

use crate::authz::audit::{AuditEntry, AuditLedger, NewAuditEntry};
use crate::authz::session::AuthzSession;
use crate::utils::error::{AuthzError, Result, RetryPolicy};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// The contract every privileged operation follows
///
/// `authorize` before touching storage, `record` once the change has been
/// made. Workflow collaborators (gate pass approval, fee collection) use the
/// same guard as role administration.
#[derive(Clone)]
pub struct PolicyGuard {
    ledger: Arc<dyn AuditLedger>,
    retry: RetryPolicy,
}

impl fmt::Debug for PolicyGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyGuard")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl PolicyGuard {
    pub fn new(ledger: Arc<dyn AuditLedger>, retry: RetryPolicy) -> Self {
        Self { ledger, retry }
    }

    /// The ledger records are written to
    pub fn ledger(&self) -> &Arc<dyn AuditLedger> {
        &self.ledger
    }

    /// `Forbidden` unless the session holds `permission`
    pub fn authorize(&self, session: &AuthzSession, permission: &str) -> Result<()> {
        session.require(permission)
    }

    /// Entry attributed to the session's user
    pub fn entry(session: &AuthzSession, action: &str) -> NewAuditEntry {
        NewAuditEntry::new(session.user_id(), session.username(), action)
    }

    /// Write the record for a change that has already been made
    ///
    /// Retries per policy. When every attempt fails the error is
    /// `AuditWriteFailed`: the change stands, its record is missing.
    ///
    /// Writes are not idempotent. An attempt whose insert committed but whose
    /// acknowledgement was lost is retried, which can leave two entries for
    /// one change. `RetryPolicy::none()` trades that for a higher chance of a
    /// missing record.
    pub async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        self.write(&entry).await.map_err(|source| {
            error!(
                "Audit record lost: {} by {} on {:?} {:?}",
                entry.action, entry.actor_username, entry.entity_type, entry.entity_id
            );
            AuthzError::AuditWriteFailed {
                action: entry.action.clone(),
                entity_id: entry.entity_id,
                source: Box::new(source),
            }
        })
    }

    /// Write a record ahead of a change; failure means the change must not happen
    pub async fn record_before(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        self.write(&entry).await
    }

    async fn write(&self, entry: &NewAuditEntry) -> Result<AuditEntry> {
        let recorded = self
            .retry
            .call(|| self.ledger.record(entry.clone()))
            .await?;
        debug!("Recorded {} as entry {}", recorded.action, recorded.id);
        Ok(recorded)
    }
}
