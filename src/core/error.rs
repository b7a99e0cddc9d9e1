/// Flightq Error Module
///
/// This module defines the error types shared by the data access layer and
/// the interactive controller.
use thiserror::Error;

/// Error type for the flightq application.
///
/// Covers the failure modes that can reach the controller:
/// - Store access (opening the file, preparing or running a query)
/// - Schema verification at startup
/// - Configuration loading
/// - Rendering a row that carries an unusable value
/// - Terminal I/O
#[derive(Error, Debug)]
pub enum FlightError {
    /// Errors raised by SQLite itself
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Query preparation or execution failures, with the failing step attached
    #[error("Query error: {0}")]
    Query(String),

    /// The store is reachable but does not look like a flights database
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A returned row holds a missing or non-numeric field
    #[error("Format error: {0}")]
    Format(String),

    /// Terminal and file system I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use FlightError as the error type.
pub type Result<T> = std::result::Result<T, FlightError>;
