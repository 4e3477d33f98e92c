use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::error::{AppError, ValidationError};

/// Default connection pool size for PostgreSQL clients.
pub const DEFAULT_POOL_SIZE: i64 = 5;

/// Name of a configured database target, e.g. `prices`.
pub type Identifier = String;

/// Supported relational database kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RelationalDatabaseKind {
    Mysql,
    Postgres,
    Sqlite,
    Bigquery,
}

impl RelationalDatabaseKind {
    pub const ALL: [RelationalDatabaseKind; 4] = [
        RelationalDatabaseKind::Mysql,
        RelationalDatabaseKind::Postgres,
        RelationalDatabaseKind::Sqlite,
        RelationalDatabaseKind::Bigquery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationalDatabaseKind::Mysql => "mysql",
            RelationalDatabaseKind::Postgres => "postgres",
            RelationalDatabaseKind::Sqlite => "sqlite",
            RelationalDatabaseKind::Bigquery => "bigquery",
        }
    }
}

impl fmt::Display for RelationalDatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationalDatabaseKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(RelationalDatabaseKind::Mysql),
            "postgres" => Ok(RelationalDatabaseKind::Postgres),
            "sqlite" => Ok(RelationalDatabaseKind::Sqlite),
            "bigquery" => Ok(RelationalDatabaseKind::Bigquery),
            other => Err(AppError::NotImplemented(other.to_string())),
        }
    }
}

/// Raw settings block stored under `relational.<identifier>`.
///
/// The `kind` is kept as written so that unknown kinds surface as
/// "not implemented" at resolution time rather than as a load failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    pub kind: String,
    #[serde(default)]
    pub configuration: Map<String, Value>,
}

impl DatabaseSettings {
    pub fn new(kind: impl Into<String>, configuration: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            configuration,
        }
    }

    /// Read a raw `relational.<identifier>` value.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(ValidationError::from)
    }

    /// Decode the untyped block into a typed configuration and run its field checks.
    pub fn decode<T>(&self) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de> + Validate,
    {
        let typed: T = serde_json::from_value(Value::Object(self.configuration.clone()))
            .map_err(ValidationError::from)?;
        typed.validate()?;
        Ok(typed)
    }
}

impl From<DatabaseSettings> for Value {
    fn from(settings: DatabaseSettings) -> Self {
        let mut block = Map::new();
        block.insert("kind".to_string(), Value::String(settings.kind));
        block.insert(
            "configuration".to_string(),
            Value::Object(settings.configuration),
        );
        Value::Object(block)
    }
}

/// Free-form labels attached to any database configuration.
pub type Labels = HashMap<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostgresPoolConfiguration {
    #[serde(default = "default_pool_size")]
    pub pool_size: i64,
}

fn default_pool_size() -> i64 {
    DEFAULT_POOL_SIZE
}

impl Default for PostgresPoolConfiguration {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl PostgresPoolConfiguration {
    /// True when the configured size is below the default.
    pub fn is_reduced(&self) -> bool {
        self.pool_size < DEFAULT_POOL_SIZE
    }
}

/// Typed PostgreSQL configuration. The password never appears in `Debug` output.
#[derive(Debug, Deserialize, Validate)]
pub struct PostgresConfiguration {
    #[validate(length(min = 1))]
    pub user: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
    #[validate(length(min = 1))]
    pub database: String,
    #[serde(default)]
    pub pool_configuration: PostgresPoolConfiguration,
    #[serde(default)]
    pub labels: Labels,
}

impl PostgresConfiguration {
    /// `host:port` pair used in connection messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Google Cloud project-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct GoogleCloudPlatformClientConfiguration {
    #[validate(length(min = 1))]
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct BigQueryConfiguration {
    #[serde(flatten)]
    #[validate(nested)]
    pub client: GoogleCloudPlatformClientConfiguration,
    #[validate(length(min = 1))]
    pub dataset_id: String,
    #[validate(length(min = 1))]
    pub table_id: String,
    #[serde(default)]
    pub labels: Labels,
}

impl BigQueryConfiguration {
    /// `project:dataset:table` triple used in connection messages.
    pub fn table_path(&self) -> String {
        format!(
            "{}:{}:{}",
            self.client.project_id, self.dataset_id, self.table_id
        )
    }
}
