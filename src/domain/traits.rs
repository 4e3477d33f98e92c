//! Domain traits defining contracts for database clients and their output.

use super::types::RelationalDatabaseKind;

/// Capability shared by every relational database client.
///
/// Clients have no lifecycle beyond construction: there is no explicit
/// close and `connect` may be called any number of times.
pub trait RelationalDatabase: Send + Sync {
    /// Kind of database this client talks to
    fn kind(&self) -> RelationalDatabaseKind;

    /// Open the connection
    fn connect(&self);

    /// Run a query
    fn query(&self, query: &str);
}

/// Line-oriented sink the clients report through.
pub trait Console: Send + Sync {
    /// Emit a single line of output
    fn line(&self, message: &str);
}
