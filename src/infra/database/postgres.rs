//! PostgreSQL database client.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{
    AppError, Console, DatabaseSettings, PostgresConfiguration, RelationalDatabase,
    RelationalDatabaseKind,
};

/// PostgreSQL client built from a validated [`PostgresConfiguration`].
pub struct PostgresSql {
    configuration: PostgresConfiguration,
    console: Arc<dyn Console>,
}

impl PostgresSql {
    /// Validate the settings block and build the client.
    pub fn new(settings: &DatabaseSettings, console: Arc<dyn Console>) -> Result<Self, AppError> {
        let configuration = settings.decode::<PostgresConfiguration>()?;
        Ok(Self::with_configuration(configuration, console))
    }

    #[must_use]
    pub fn with_configuration(
        configuration: PostgresConfiguration,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            configuration,
            console,
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &PostgresConfiguration {
        &self.configuration
    }
}

impl RelationalDatabase for PostgresSql {
    fn kind(&self) -> RelationalDatabaseKind {
        RelationalDatabaseKind::Postgres
    }

    #[instrument(skip(self), fields(address = %self.configuration.address()))]
    fn connect(&self) {
        info!(database = %self.configuration.database, "Connecting to PostgreSQL");
        self.console.line(&format!(
            "Connecting to PostgresSQL on {}",
            self.configuration.address()
        ));

        let pool = &self.configuration.pool_configuration;
        if pool.is_reduced() {
            warn!(pool_size = pool.pool_size, "Pool size below default");
            self.console.line(&format!(
                "Pool size default value has been changed: {}",
                pool.pool_size
            ));
        }
    }

    #[instrument(skip(self, query))]
    fn query(&self, query: &str) {
        self.console.line(&format!("Executing query: {query}"));
    }
}
