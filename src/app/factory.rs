//! Identifier to client resolution.
//!
//! The factory reads the settings block for an identifier, parses its kind
//! and hands the block to the constructor registered for that kind.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::{AppError, Console, DatabaseSettings, RelationalDatabase, RelationalDatabaseKind};
use crate::infra::{BigQuery, PostgresSql, Settings};

/// Builds a client from its settings block.
pub type DatabaseConstructor =
    fn(&DatabaseSettings, Arc<dyn Console>) -> Result<Arc<dyn RelationalDatabase>, AppError>;

fn build_postgres(
    settings: &DatabaseSettings,
    console: Arc<dyn Console>,
) -> Result<Arc<dyn RelationalDatabase>, AppError> {
    Ok(Arc::new(PostgresSql::new(settings, console)?))
}

fn build_bigquery(
    settings: &DatabaseSettings,
    console: Arc<dyn Console>,
) -> Result<Arc<dyn RelationalDatabase>, AppError> {
    Ok(Arc::new(BigQuery::new(settings, console)?))
}

/// Factory resolving configured identifiers to database clients.
///
/// # Example
///
/// ```ignore
/// let settings = Arc::new(Settings::load()?);
/// let factory = RelationalDatabaseFactory::new(settings, Arc::new(StdoutConsole));
///
/// let db = factory.get_database_instance_from_identifier("prices")?;
/// db.connect();
/// ```
pub struct RelationalDatabaseFactory {
    settings: Arc<Settings>,
    console: Arc<dyn Console>,
    constructors: HashMap<RelationalDatabaseKind, DatabaseConstructor>,
}

impl RelationalDatabaseFactory {
    /// Creates a factory with the PostgreSQL and BigQuery constructors registered.
    #[must_use]
    pub fn new(settings: Arc<Settings>, console: Arc<dyn Console>) -> Self {
        let mut factory = Self::empty(settings, console);
        factory.register(RelationalDatabaseKind::Postgres, build_postgres);
        factory.register(RelationalDatabaseKind::Bigquery, build_bigquery);
        factory
    }

    /// Creates a factory with no constructors registered.
    #[must_use]
    pub fn empty(settings: Arc<Settings>, console: Arc<dyn Console>) -> Self {
        Self {
            settings,
            console,
            constructors: HashMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for a kind.
    pub fn register(&mut self, kind: RelationalDatabaseKind, constructor: DatabaseConstructor) {
        debug!(%kind, "Registering database constructor");
        self.constructors.insert(kind, constructor);
    }

    pub fn supports(&self, kind: RelationalDatabaseKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves an identifier to a configured client.
    ///
    /// # Errors
    ///
    /// - `AppError::Config` if the identifier has no settings block
    /// - `AppError::NotImplemented` if no constructor handles the block's kind
    /// - `AppError::Validation` if the block does not fit the kind's schema
    #[instrument(skip(self))]
    pub fn get_database_instance_from_identifier(
        &self,
        identifier: &str,
    ) -> Result<Arc<dyn RelationalDatabase>, AppError> {
        let settings = self.settings.relational(identifier)?;

        let constructor = settings
            .kind
            .parse::<RelationalDatabaseKind>()
            .ok()
            .and_then(|kind| self.constructors.get(&kind))
            .ok_or_else(|| AppError::NotImplemented(settings.kind.clone()))?;

        let database = constructor(&settings, Arc::clone(&self.console))?;
        info!(kind = %database.kind(), "Resolved database client");
        Ok(database)
    }
}
