/// Core Module for flightq
///
/// Shared infrastructure: the error type and the flights data access layer.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{FlightError, Result};
