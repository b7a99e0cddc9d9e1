/// Query Execution Module
///
/// The four read-only flight lookups. Each one binds its parameters into a
/// fixed statement, runs it on a fresh connection and returns the rows in
/// the order the store produced them.

use super::connection::FlightStore;
use crate::core::{FlightError, Result};
use rusqlite::{types::Value, Params, Row};
use tracing::{debug, error};

/// Departure delays at or above this many minutes count as delayed.
pub const DELAY_THRESHOLD_MINUTES: i64 = 20;

/// Builds a statement over the flights/airlines join with the given tail.
macro_rules! flight_select {
    ($tail:literal) => {
        concat!(
            "SELECT flights.ID, flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT, ",
            "airlines.AIRLINE, flights.DEPARTURE_DELAY ",
            "FROM flights ",
            "JOIN airlines ON flights.AIRLINE = airlines.ID ",
            $tail
        )
    };
}

const FLIGHT_BY_ID_SQL: &str = flight_select!("WHERE flights.ID = ?1");

const FLIGHTS_BY_DATE_SQL: &str =
    flight_select!("WHERE flights.YEAR = ?1 AND flights.MONTH = ?2 AND flights.DAY = ?3");

const DELAYED_BY_AIRLINE_SQL: &str = flight_select!(
    "WHERE airlines.AIRLINE = ?1 AND flights.DEPARTURE_DELAY >= ?2 \
     ORDER BY flights.DEPARTURE_DELAY DESC"
);

const DELAYED_BY_AIRPORT_SQL: &str = flight_select!(
    "WHERE flights.ORIGIN_AIRPORT = ?1 AND flights.DEPARTURE_DELAY >= ?2 \
     ORDER BY flights.DEPARTURE_DELAY DESC"
);

/// DEPARTURE_DELAY as it was stored, before conversion to minutes.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredDelay {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<Value> for StoredDelay {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StoredDelay::Null,
            Value::Integer(n) => StoredDelay::Integer(n),
            Value::Real(n) => StoredDelay::Real(n),
            Value::Text(text) => StoredDelay::Text(text),
            Value::Blob(bytes) => StoredDelay::Blob(bytes),
        }
    }
}

/// A flight as surfaced by the lookups.
///
/// `airline` is the display name from the airlines table, never the raw
/// identifier stored on the flight. Text fields stay optional so a damaged
/// row can still be returned and reported when it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: i64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub airline: Option<String>,
    pub departure_delay: StoredDelay,
}

/// Reads a display column. Numbers are rendered as text; NULL and BLOB are `None`.
fn text_field(value: Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text),
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(n) => Some(n.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

impl Flight {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Flight {
            id: row.get(0)?,
            origin: text_field(row.get(1)?),
            destination: text_field(row.get(2)?),
            airline: text_field(row.get(3)?),
            departure_delay: row.get::<_, Value>(4)?.into(),
        })
    }

    /// Departure delay in whole minutes.
    ///
    /// NULL and empty text count as no delay, REAL values are truncated
    /// toward zero and other TEXT must hold an integer.
    ///
    /// # Errors
    ///
    /// Returns `FlightError::Format` when the stored value cannot be read as minutes.
    pub fn delay_minutes(&self) -> Result<i64> {
        match &self.departure_delay {
            StoredDelay::Null => Ok(0),
            StoredDelay::Integer(minutes) => Ok(*minutes),
            StoredDelay::Real(minutes) if minutes.is_finite() => Ok(minutes.trunc() as i64),
            StoredDelay::Text(text) if text.trim().is_empty() => Ok(0),
            StoredDelay::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                FlightError::Format(format!(
                    "invalid DEPARTURE_DELAY {:?} for flight {}",
                    text, self.id
                ))
            }),
            other => Err(FlightError::Format(format!(
                "invalid DEPARTURE_DELAY {:?} for flight {}",
                other, self.id
            ))),
        }
    }
}

impl FlightStore {
    /// Looks up a flight by its ID. Returns zero or one rows.
    pub fn flight_by_id(&self, id: i64) -> Result<Vec<Flight>> {
        self.fetch_flights("flight_by_id", FLIGHT_BY_ID_SQL, [id])
    }

    /// Returns every flight scheduled on the given calendar date.
    pub fn flights_by_date(&self, day: u32, month: u32, year: i32) -> Result<Vec<Flight>> {
        self.fetch_flights(
            "flights_by_date",
            FLIGHTS_BY_DATE_SQL,
            (i64::from(year), i64::from(month), i64::from(day)),
        )
    }

    /// Returns the delayed flights of the airline with exactly this display
    /// name, most delayed first.
    pub fn delayed_flights_by_airline(&self, name: &str) -> Result<Vec<Flight>> {
        self.fetch_flights(
            "delayed_flights_by_airline",
            DELAYED_BY_AIRLINE_SQL,
            (name, DELAY_THRESHOLD_MINUTES),
        )
    }

    /// Returns the delayed flights departing from an airport, most delayed first.
    pub fn delayed_flights_by_airport(&self, iata_code: &str) -> Result<Vec<Flight>> {
        self.fetch_flights(
            "delayed_flights_by_airport",
            DELAYED_BY_AIRPORT_SQL,
            (iata_code, DELAY_THRESHOLD_MINUTES),
        )
    }

    fn fetch_flights<P: Params>(&self, operation: &str, sql: &str, params: P) -> Result<Vec<Flight>> {
        let conn = self.connect()?;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| FlightError::Query(format!("Failed to prepare {}: {}", operation, e)))?;

        let flights = stmt
            .query_map(params, Flight::from_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| {
                error!("{} failed: {}", operation, e);
                FlightError::Query(format!("{} failed: {}", operation, e))
            })?;

        debug!("{} returned {} rows", operation, flights.len());
        Ok(flights)
    }
}
