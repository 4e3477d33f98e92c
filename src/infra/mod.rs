//! Infrastructure layer implementations.

pub mod console;
pub mod database;
pub mod observability;
pub mod settings;

pub use console::{BufferConsole, StdoutConsole};
pub use database::{BigQuery, PostgresSql};
pub use observability::{LogFormat, init_tracing};
pub use settings::{Settings, SettingsLoader};
