//! Holder of the process's current session

use crate::authz::audit::{AuditLedger, NewAuditEntry, actions, entity_types};
use crate::utils::error::Result;
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

use super::opener::SessionOpener;
use super::session::{AuthenticatedUser, AuthzSession};

/// Owns the single active session of a process
///
/// Passed explicitly to whoever needs it; there is no global instance.
pub struct SessionManager {
    opener: SessionOpener,
    ledger: Arc<dyn AuditLedger>,
    current: ArcSwapOption<AuthzSession>,
    audit_logins: bool,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("opener", &self.opener)
            .field("current", &self.current.load().as_ref().map(|s| s.username().to_string()))
            .field("audit_logins", &self.audit_logins)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(opener: SessionOpener, ledger: Arc<dyn AuditLedger>, audit_logins: bool) -> Self {
        Self {
            opener,
            ledger,
            current: ArcSwapOption::empty(),
            audit_logins,
        }
    }

    /// Open a fresh session and make it current
    ///
    /// Any previous session is closed first, so a rejected login leaves no
    /// session current.
    pub async fn login(&self, user: AuthenticatedUser) -> Result<Arc<AuthzSession>> {
        if let Some(previous) = self.current.swap(None) {
            previous.close();
        }

        let session = Arc::new(self.opener.open(user).await?);
        self.current.store(Some(Arc::clone(&session)));
        info!("{} logged in as {}", session.username(), session.role_code());

        self.record_lifecycle(&session, actions::LOGIN, "User logged in")
            .await;
        Ok(session)
    }

    /// Close and clear the current session, if any
    pub async fn logout(&self) -> Option<Arc<AuthzSession>> {
        let session = self.current.swap(None)?;
        session.close();
        info!("{} logged out", session.username());

        self.record_lifecycle(&session, actions::LOGOUT, "User logged out")
            .await;
        Some(session)
    }

    /// The active session
    pub fn current(&self) -> Option<Arc<AuthzSession>> {
        self.current.load_full()
    }

    async fn record_lifecycle(&self, session: &AuthzSession, action: &str, details: &str) {
        if !self.audit_logins {
            return;
        }

        let entry = NewAuditEntry::new(session.user_id(), session.username(), action)
            .entity(entity_types::USER, Some(i64::from(session.user_id())))
            .details(details);

        if let Err(e) = self.ledger.record(entry).await {
            error!(
                "Could not record {} for {}: {}",
                action,
                session.username(),
                e
            );
        }
    }
}
