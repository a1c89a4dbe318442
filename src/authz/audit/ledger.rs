//! Audit ledger contract

use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use futures::stream::BoxStream;

use super::types::{AuditEntry, AuditFilter, NewAuditEntry};

/// Lazily fetched entries, newest first
pub type AuditStream = BoxStream<'static, Result<AuditEntry>>;

/// Append-only record of privileged actions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLedger: Send + Sync {
    /// Append an entry stamped with the ledger's clock
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry>;

    /// Matching entries ordered by timestamp then id, both descending
    fn query(&self, filter: AuditFilter) -> AuditStream;

    /// Number of matching entries, ignoring `limit`
    async fn count(&self, filter: AuditFilter) -> Result<u64>;

    /// Remove entries strictly older than `cutoff`; returns the exact count
    async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    /// Remove entries strictly older than `days` days before now
    async fn purge_older_than(&self, days: u32) -> Result<u64>;
}

/// Query shorthands available on every ledger
pub trait AuditLedgerExt: AuditLedger {
    /// Entries recorded by one user
    fn query_by_actor(&self, username: &str) -> AuditStream {
        self.query(AuditFilter::default().actor(username))
    }

    /// Entries with one action code
    fn query_by_action(&self, action: &str) -> AuditStream {
        self.query(AuditFilter::default().action(action))
    }

    /// Entries with `start <= timestamp <= end`
    fn query_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AuditStream {
        self.query(AuditFilter::default().between(start, end))
    }

    /// Every entry, optionally capped
    fn query_all(&self, limit: Option<u64>) -> AuditStream {
        self.query(AuditFilter {
            limit,
            ..AuditFilter::default()
        })
    }
}

impl<T: AuditLedger + ?Sized> AuditLedgerExt for T {}

/// Cutoff used by `purge_older_than`
///
/// Saturates at the earliest representable instant, so an oversized `days`
/// selects nothing rather than failing.
pub fn retention_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
