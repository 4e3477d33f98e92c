//! BigQuery client.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{
    AppError, BigQueryConfiguration, Console, DatabaseSettings, RelationalDatabase,
    RelationalDatabaseKind,
};

/// BigQuery client built from a validated [`BigQueryConfiguration`].
pub struct BigQuery {
    configuration: BigQueryConfiguration,
    console: Arc<dyn Console>,
}

impl BigQuery {
    /// Validate the settings block and build the client.
    pub fn new(settings: &DatabaseSettings, console: Arc<dyn Console>) -> Result<Self, AppError> {
        let configuration = settings.decode::<BigQueryConfiguration>()?;
        Ok(Self::with_configuration(configuration, console))
    }

    #[must_use]
    pub fn with_configuration(
        configuration: BigQueryConfiguration,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            configuration,
            console,
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &BigQueryConfiguration {
        &self.configuration
    }
}

impl RelationalDatabase for BigQuery {
    fn kind(&self) -> RelationalDatabaseKind {
        RelationalDatabaseKind::Bigquery
    }

    #[instrument(skip(self), fields(table = %self.configuration.table_path()))]
    fn connect(&self) {
        info!("Connecting to BigQuery");
        self.console.line(&format!(
            "Connecting to BigQuery on {}",
            self.configuration.table_path()
        ));
    }

    #[instrument(skip(self, query))]
    fn query(&self, query: &str) {
        self.console.line(&format!("Executing query: {query}"));
    }
}
