//! Mock implementations and settings fixtures for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value, json};

use crate::domain::{
    AppError, Console, DatabaseSettings, RelationalDatabase, RelationalDatabaseKind,
};
use crate::infra::Settings;

/// Mock database client that reports through the injected console
/// and counts calls.
pub struct MockDatabase {
    kind: RelationalDatabaseKind,
    console: Arc<dyn Console>,
    connect_count: AtomicU64,
    query_count: AtomicU64,
}

impl MockDatabase {
    #[must_use]
    pub fn new(kind: RelationalDatabaseKind, console: Arc<dyn Console>) -> Self {
        Self {
            kind,
            console,
            connect_count: AtomicU64::new(0),
            query_count: AtomicU64::new(0),
        }
    }

    /// Constructor with the factory's signature; takes the kind from the block.
    pub fn construct(
        settings: &DatabaseSettings,
        console: Arc<dyn Console>,
    ) -> Result<Arc<dyn RelationalDatabase>, AppError> {
        let kind = settings.kind.parse::<RelationalDatabaseKind>()?;
        Ok(Arc::new(Self::new(kind, console)))
    }

    pub fn connect_count(&self) -> u64 {
        self.connect_count.load(Ordering::Relaxed)
    }

    pub fn query_count(&self) -> u64 {
        self.query_count.load(Ordering::Relaxed)
    }
}

impl RelationalDatabase for MockDatabase {
    fn kind(&self) -> RelationalDatabaseKind {
        self.kind
    }

    fn connect(&self) {
        self.connect_count.fetch_add(1, Ordering::Relaxed);
        self.console.line(&format!("Connecting to mock {}", self.kind));
    }

    fn query(&self, query: &str) {
        self.query_count.fetch_add(1, Ordering::Relaxed);
        self.console.line(&format!("Mock query: {query}"));
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Settings holding a single identifier.
pub fn settings_with(identifier: &str, kind: &str, configuration: Value) -> Settings {
    Settings::default().with_database(identifier, DatabaseSettings::new(kind, object(configuration)))
}

/// `prices` on local PostgreSQL and `file-manager` on BigQuery.
pub fn sample_settings() -> Settings {
    Settings::default()
        .with_database(
            "prices",
            DatabaseSettings::new(
                "postgres",
                object(json!({
                    "user": "app",
                    "password": "secret",
                    "host": "localhost",
                    "port": 5432,
                    "database": "prices",
                })),
            ),
        )
        .with_database(
            "file-manager",
            DatabaseSettings::new(
                "bigquery",
                object(json!({
                    "project_id": "acme",
                    "dataset_id": "files",
                    "table_id": "uploads",
                })),
            ),
        )
}
