//! Audit ledger
//!
//! Append-only record of privileged actions, queryable by actor, action type
//! and time window. Queries are lazy streams fetched page by page.

mod database;
mod ledger;
mod types;

pub use database::DatabaseAuditLedger;
#[cfg(test)]
pub use ledger::MockAuditLedger;
pub use ledger::{AuditLedger, AuditLedgerExt, AuditStream, retention_cutoff};
pub use types::{AuditEntry, AuditFilter, NewAuditEntry, actions, entity_types};
