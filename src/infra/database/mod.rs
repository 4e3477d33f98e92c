//! Concrete database client implementations.
//!
//! Each adapter implements the `RelationalDatabase` trait defined in the
//! domain layer and validates its own configuration block on construction.

pub mod bigquery;
pub mod postgres;

pub use bigquery::BigQuery;
pub use postgres::PostgresSql;
