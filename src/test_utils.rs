/// # Test Utilities Module
///
/// Builds throwaway flights databases on disk. Each fixture owns its own
/// temporary directory, so tests never share a store and the file is removed
/// when the fixture is dropped.

use crate::core::{FlightError, Result};
use crate::core::db::FlightStore;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Schema matching the production flights database.
pub const FLIGHTS_SCHEMA: &str = "
    CREATE TABLE airlines (
        ID INTEGER PRIMARY KEY,
        AIRLINE TEXT
    );

    CREATE TABLE flights (
        ID INTEGER PRIMARY KEY,
        YEAR INTEGER,
        MONTH INTEGER,
        DAY INTEGER,
        AIRLINE INTEGER,
        ORIGIN_AIRPORT TEXT,
        DESTINATION_AIRPORT TEXT,
        DEPARTURE_DELAY INTEGER
    );
";

/// Sample rows covering the delay boundaries (19, 20, NULL, 0, negative,
/// fractional) and one flight whose airline is unknown.
pub const SAMPLE_DATA: &str = "
    INSERT INTO airlines (ID, AIRLINE) VALUES
        (1, 'United Air Lines Inc.'),
        (2, 'Delta Air Lines Inc.'),
        (3, 'American Airlines Inc.');

    INSERT INTO flights
        (ID, YEAR, MONTH, DAY, AIRLINE, ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY)
    VALUES
        (1, 2015, 1, 1, 1, 'LAX', 'JFK', -3),
        (2, 2015, 1, 1, 2, 'JFK', 'ATL', 45),
        (3, 2015, 1, 1, 1, 'JFK', 'SFO', 20),
        (4, 2015, 1, 2, 2, 'ATL', 'JFK', 19),
        (5, 2015, 1, 2, 3, 'JFK', 'LAX', NULL),
        (6, 2015, 1, 2, 1, 'SFO', 'LAX', 120),
        (7, 2020, 1, 5, 3, 'DFW', 'JFK', 0),
        (8, 2020, 1, 5, 2, 'ATL', 'DFW', 33.7),
        (9, 2015, 1, 1, 99, 'BOS', 'JFK', 50);
";

/// Replaces `flights` with a table whose columns have no declared type, so
/// values keep whatever storage class they were inserted with. Flight 8
/// carries a numeric origin airport.
pub const UNTYPED_FLIGHTS: &str = "
    DROP TABLE flights;

    CREATE TABLE flights (
        ID INTEGER PRIMARY KEY,
        YEAR, MONTH, DAY, AIRLINE,
        ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY
    );

    INSERT INTO flights
        (ID, YEAR, MONTH, DAY, AIRLINE, ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY)
    VALUES
        (7, 2020, 1, 5, 3, 'DFW', 'JFK', 0),
        (8, 2020, 1, 5, 2, 10397, 'DFW', 33.7);
";

/// Isolated on-disk flights database
pub struct FlightsFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl FlightsFixture {
    /// Creates an empty database with the flights schema.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("flights.sqlite3");

        let fixture = FlightsFixture { _dir: dir, path };
        fixture.execute_batch(FLIGHTS_SCHEMA)?;
        Ok(fixture)
    }

    /// Creates a database populated with `SAMPLE_DATA`.
    pub fn with_sample_data() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.execute_batch(SAMPLE_DATA)?;
        Ok(fixture)
    }

    /// Runs arbitrary SQL against the fixture through a writable connection.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = Connection::open(&self.path).map_err(FlightError::Database)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A store handle over the fixture, without schema verification.
    pub fn store(&self) -> FlightStore {
        FlightStore::new(self.path.clone())
    }
}
