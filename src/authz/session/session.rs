//! Per-login permission snapshot

use crate::authz::types::UserId;
use crate::utils::error::{AuthzError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Identity handed over by the authentication collaborator; trusted as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role_code: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, username: impl Into<String>, role_code: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            role_code: role_code.into(),
        }
    }
}

/// Snapshot of one user's effective permissions, taken at login
///
/// Every check is a set lookup; nothing here touches storage. Role edits made
/// after login are not visible until the next login. Once closed, every check
/// returns `false`.
#[derive(Debug)]
pub struct AuthzSession {
    user: AuthenticatedUser,
    permissions: HashSet<String>,
    login_time: DateTime<Utc>,
    closed: AtomicBool,
}

impl AuthzSession {
    pub fn new(user: AuthenticatedUser, permissions: HashSet<String>, login_time: DateTime<Utc>) -> Self {
        Self {
            user,
            permissions,
            login_time,
            closed: AtomicBool::new(false),
        }
    }

    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    pub fn user_id(&self) -> UserId {
        self.user.user_id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn role_code(&self) -> &str {
        &self.user.role_code
    }

    pub fn login_time(&self) -> DateTime<Utc> {
        self.login_time
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Fail the session closed
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether the snapshot grants `code`
    pub fn has_permission(&self, code: &str) -> bool {
        !self.is_closed() && self.permissions.contains(code)
    }

    /// Whether at least one of `codes` is granted
    pub fn has_any_permission(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.has_permission(code))
    }

    /// Whether every one of `codes` is granted; an empty list only needs an open session
    pub fn has_all_permissions(&self, codes: &[&str]) -> bool {
        !self.is_closed() && codes.iter().all(|code| self.has_permission(code))
    }

    /// `Forbidden` unless `code` is granted
    pub fn require(&self, code: &str) -> Result<()> {
        if self.has_permission(code) {
            Ok(())
        } else {
            warn!("Denied {} to {}", code, self.user.username);
            Err(AuthzError::forbidden(&self.user.username, code))
        }
    }

    /// Whether the session was opened for `role_code`
    pub fn is_role(&self, role_code: &str) -> bool {
        !self.is_closed() && self.user.role_code == role_code
    }

    /// Granted codes in sorted order; empty once closed
    pub fn effective_permissions(&self) -> BTreeSet<String> {
        if self.is_closed() {
            return BTreeSet::new();
        }
        self.permissions.iter().cloned().collect()
    }
}
