/// Database Module
///
/// Read-only access to the flights store, split into two concerns:
/// - **Connection Management** (`connection.rs`): locating the store, opening
///   a scoped read-only connection per call, and verifying the schema once at startup
/// - **Query Execution** (`query.rs`): the `Flight` record and the four lookups
///
/// ## Error Handling
///
/// All operations return the crate-wide `FlightError`; nothing is retried here.
pub mod connection;
pub mod query;

pub use connection::*;
pub use query::*;
