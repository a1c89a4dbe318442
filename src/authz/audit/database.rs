//! Database-backed audit ledger

use crate::storage::database::{AuditCursor, Database};
use crate::utils::clock::Clock;
use crate::utils::error::Result;
use async_stream::stream;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

use super::ledger::{AuditLedger, AuditStream, retention_cutoff};
use super::types::{AuditEntry, AuditFilter, NewAuditEntry};

/// `AuditLedger` over the `audit_logs` table
#[derive(Debug, Clone)]
pub struct DatabaseAuditLedger {
    db: Arc<Database>,
    clock: Arc<dyn Clock>,
    page_size: u64,
}

impl DatabaseAuditLedger {
    /// Create a ledger; queries fetch `page_size` rows per round trip
    pub fn new(db: Arc<Database>, clock: Arc<dyn Clock>, page_size: u64) -> Self {
        Self {
            db,
            clock,
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl AuditLedger for DatabaseAuditLedger {
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        self.db
            .insert_audit_entry(&entry, self.clock.now())
            .await
            .inspect_err(|e| {
                error!(
                    "Failed to record audit entry {} by {}: {}",
                    entry.action, entry.actor_username, e
                )
            })
    }

    fn query(&self, filter: AuditFilter) -> AuditStream {
        let db = Arc::clone(&self.db);
        let page_size = self.page_size;

        Box::pin(stream! {
            let mut remaining = filter.limit;
            let mut cursor: Option<AuditCursor> = None;

            loop {
                let want = match remaining {
                    Some(0) => break,
                    Some(n) => n.min(page_size),
                    None => page_size,
                };

                let page = match db.audit_page(&filter, cursor, want).await {
                    Ok(page) => page,
                    Err(e) => {
                        error!("Audit query failed: {}", e);
                        yield Err(e);
                        break;
                    }
                };
                let fetched = page.len() as u64;
                cursor = page.last().map(|last| (last.timestamp, last.id));

                for entry in page {
                    yield Ok(entry);
                }

                if let Some(n) = remaining.as_mut() {
                    *n = n.saturating_sub(fetched);
                }
                if fetched < want {
                    break;
                }
            }
        })
    }

    async fn count(&self, filter: AuditFilter) -> Result<u64> {
        self.db.count_audit_entries(&filter).await
    }

    async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let removed = self.db.delete_audit_entries_before(cutoff).await?;
        info!("Purged {} audit entries older than {}", removed, cutoff);
        Ok(removed)
    }

    async fn purge_older_than(&self, days: u32) -> Result<u64> {
        self.purge_before(retention_cutoff(self.clock.now(), days))
            .await
    }
}
