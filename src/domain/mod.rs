//! Domain layer containing core types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, ValidationError};
pub use traits::{Console, RelationalDatabase};
pub use types::{
    BigQueryConfiguration, DEFAULT_POOL_SIZE, DatabaseSettings,
    GoogleCloudPlatformClientConfiguration, Identifier, Labels, PostgresConfiguration,
    PostgresPoolConfiguration, RelationalDatabaseKind,
};
