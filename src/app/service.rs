//! Application service layer.
//!
//! Drives the factory for the identifiers the binary connects on start.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{AppError, RelationalDatabase};

use super::factory::RelationalDatabaseFactory;

/// Identifiers connected by the binary entry point, in order.
pub const DEFAULT_IDENTIFIERS: [&str; 2] = ["prices", "file-manager"];

/// Application service wrapping the database factory.
pub struct AppService {
    factory: Arc<RelationalDatabaseFactory>,
}

impl AppService {
    #[must_use]
    pub fn new(factory: Arc<RelationalDatabaseFactory>) -> Self {
        Self { factory }
    }

    #[must_use]
    pub fn factory(&self) -> &RelationalDatabaseFactory {
        &self.factory
    }

    /// Resolves each identifier in turn and connects it.
    ///
    /// Stops at the first identifier that fails to resolve; clients resolved
    /// before it have already connected.
    #[instrument(skip(self))]
    pub fn connect_all(
        &self,
        identifiers: &[&str],
    ) -> Result<Vec<Arc<dyn RelationalDatabase>>, AppError> {
        let mut databases = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let database = self
                .factory
                .get_database_instance_from_identifier(identifier)?;
            database.connect();
            databases.push(database);
        }
        info!(count = databases.len(), "Connected databases");
        Ok(databases)
    }

    /// Connects the default identifiers.
    pub fn run(&self) -> Result<(), AppError> {
        self.connect_all(&DEFAULT_IDENTIFIERS).map(|_| ())
    }

    /// Resolves an identifier and runs a single query on it.
    #[instrument(skip(self, query))]
    pub fn query(&self, identifier: &str, query: &str) -> Result<(), AppError> {
        let database = self
            .factory
            .get_database_instance_from_identifier(identifier)?;
        database.connect();
        database.query(query);
        Ok(())
    }
}
