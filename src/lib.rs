//! Relational Database Factory
//!
//! Resolves named identifiers such as `prices` to configured relational
//! database clients, using layered YAML settings and environment overrides.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Application Layer              │
//! │   Factory (kind → constructor), service      │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Traits, configuration models, errors       │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  Settings loader, client stubs, console      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Settings
//!
//! `config/settings.yaml` is merged with `config/settings-<env>.yaml`, where
//! `<env>` comes from `NGX_ENV` (default `local`). Variables such as
//! `NGX_RELATIONAL__PRICES__CONFIGURATION__PORT` override individual keys.
//!
//! ```yaml
//! relational:
//!   prices:
//!     kind: postgres
//!     configuration:
//!       user: app
//!       password: secret
//!       host: localhost
//!       port: 5432
//!       database: prices
//!       pool_configuration:
//!         pool_size: 3
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use relational_db_factory::app::RelationalDatabaseFactory;
//! use relational_db_factory::infra::{Settings, StdoutConsole};
//!
//! let settings = Arc::new(Settings::load()?);
//! let factory = RelationalDatabaseFactory::new(settings, Arc::new(StdoutConsole));
//!
//! let db = factory.get_database_instance_from_identifier("prices")?;
//! db.connect();
//! db.query("SELECT 1");
//! ```

pub mod app;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
