/// Connection Management Module
///
/// Locates the flights store and hands out short-lived, read-only connections.
/// No connection outlives the call that opened it, so nothing is held open
/// while the controller waits on user input.

use crate::core::{FlightError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tables and columns every lookup depends on.
pub const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "flights",
        &[
            "ID",
            "ORIGIN_AIRPORT",
            "DESTINATION_AIRPORT",
            "AIRLINE",
            "DEPARTURE_DELAY",
            "YEAR",
            "MONTH",
            "DAY",
        ],
    ),
    ("airlines", &["ID", "AIRLINE"]),
];

/// Handle to a file-based flights store.
///
/// The handle itself is only a locator; every query opens its own connection.
#[derive(Debug, Clone)]
pub struct FlightStore {
    path: PathBuf,
}

impl FlightStore {
    /// Creates a handle without touching the file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FlightStore { path: path.into() }
    }

    /// Creates a handle and verifies that the store can be opened and has
    /// the expected tables.
    ///
    /// # Errors
    ///
    /// Returns `FlightError::Database` if the file cannot be opened or is not
    /// a SQLite database, and `FlightError::Schema` if a table or column is missing.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let store = FlightStore::new(path);
        store.verify_schema()?;
        info!("Opened flights store at {}", store.path.display());
        Ok(store)
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a read-only connection scoped to the caller.
    pub fn connect(&self) -> Result<Connection> {
        debug!("Opening read-only connection to {}", self.path.display());
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Checks that every table in `REQUIRED_SCHEMA` exists with its columns.
    pub fn verify_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;

        for (table, columns) in REQUIRED_SCHEMA {
            let present = stmt
                .query_map([table], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            if present.is_empty() {
                return Err(FlightError::Schema(format!("missing table `{}`", table)));
            }

            let missing: Vec<&str> = columns
                .iter()
                .copied()
                .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
                .collect();

            if !missing.is_empty() {
                return Err(FlightError::Schema(format!(
                    "table `{}` is missing columns: {}",
                    table,
                    missing.join(", ")
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FlightsFixture;

    #[test]
    fn test_open_verifies_sample_store() {
        let fixture = FlightsFixture::with_sample_data().unwrap();
        let store = FlightStore::open(fixture.path()).unwrap();
        assert_eq!(store.path(), fixture.path());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FlightStore::open(dir.path().join("nowhere.sqlite3"));

        match result.unwrap_err() {
            FlightError::Database(_) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_rejects_store_without_airlines() {
        let fixture = FlightsFixture::new().unwrap();
        fixture.execute_batch("DROP TABLE airlines;").unwrap();

        let err = FlightStore::open(fixture.path()).unwrap_err();
        match err {
            FlightError::Schema(msg) => assert!(msg.contains("airlines"), "{}", msg),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_reports_missing_columns() {
        let fixture = FlightsFixture::new().unwrap();
        fixture
            .execute_batch(
                "DROP TABLE flights;
                 CREATE TABLE flights (ID INTEGER PRIMARY KEY, AIRLINE INTEGER, YEAR INTEGER);",
            )
            .unwrap();

        let err = FlightStore::open(fixture.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ORIGIN_AIRPORT"), "{}", msg);
        assert!(msg.contains("DEPARTURE_DELAY"), "{}", msg);
        assert!(!msg.contains("YEAR"), "{}", msg);
    }

    #[test]
    fn test_connections_are_read_only() {
        let fixture = FlightsFixture::with_sample_data().unwrap();
        let conn = fixture.store().connect().unwrap();

        let result = conn.execute("DELETE FROM flights", []);
        assert!(result.is_err());
    }
}
