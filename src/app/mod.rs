//! Application layer containing the factory and the service driving it.

pub mod factory;
pub mod service;

pub use factory::{DatabaseConstructor, RelationalDatabaseFactory};
pub use service::{AppService, DEFAULT_IDENTIFIERS};
