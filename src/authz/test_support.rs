//! Shared fixtures for unit tests

use crate::config::DatabaseConfig;
use crate::storage::database::Database;
use crate::utils::clock::ManualClock;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

/// Migrated in-memory SQLite database
pub(crate) async fn test_db() -> Arc<Database> {
    let db = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
    db.migrate().await.unwrap();
    Arc::new(db)
}

/// Clock frozen at the start of term
pub(crate) fn fixed_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap())
}
