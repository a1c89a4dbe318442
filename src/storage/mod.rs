//! Storage layer for the authorization subsystem
//!
//! This module owns the database connection shared by the role store, the
//! permission catalog, the user directory and the audit ledger.

/// Database storage module
pub mod database;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Main storage layer
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);

        info!("Storage layer initialized successfully");
        Ok(Self { database })
    }

    /// Wrap an existing connection
    pub fn from_database(database: Arc<database::Database>) -> Self {
        Self { database }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Check connectivity
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }

    /// Get database connection
    pub fn db(&self) -> Arc<database::Database> {
        Arc::clone(&self.database)
    }
}
