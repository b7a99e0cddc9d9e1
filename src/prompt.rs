//! Input validation and the blocking reprompt loop.
//!
//! Every validator returns an `InputError` whose message is exactly what the
//! user sees before being asked again.

use crate::core::Result;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Length of an IATA airport code.
pub const IATA_LENGTH: usize = 3;
/// Accepted date input format (DD/MM/YYYY).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Rejected user input. Recovered by asking again, never surfaced as a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid choice. Try again.")]
    UnknownChoice,

    #[error("Invalid input. Please enter a numeric flight ID.")]
    FlightId,

    #[error("Invalid format. Please use DD/MM/YYYY format.")]
    Date,

    #[error("Invalid IATA code. Try again.")]
    IataCode,

    #[error("Airline name cannot be empty. Try again.")]
    EmptyAirline,
}

pub fn parse_flight_id(input: &str) -> std::result::Result<i64, InputError> {
    input.trim().parse::<i64>().map_err(|_| InputError::FlightId)
}

/// Parses a `DD/MM/YYYY` date. Impossible dates such as 31/02 are rejected.
pub fn parse_date(input: &str) -> std::result::Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| InputError::Date)
}

/// Normalizes an airport code to upper case and checks it is three letters.
pub fn parse_iata_code(input: &str) -> std::result::Result<String, InputError> {
    let code = input.trim().to_uppercase();
    if code.chars().count() == IATA_LENGTH && code.chars().all(char::is_alphabetic) {
        Ok(code)
    } else {
        Err(InputError::IataCode)
    }
}

pub fn parse_airline_name(input: &str) -> std::result::Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        Err(InputError::EmptyAirline)
    } else {
        Ok(name.to_string())
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Asks until `parse` accepts a line.
    ///
    /// Each rejected line prints the validator's message and the prompt again.
    /// Returns `Ok(None)` when the input is exhausted.
    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> std::result::Result<T, InputError>,
    {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed while waiting for {:?}", prompt.trim());
                return Ok(None);
            }

            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    debug!("Rejected input {:?}: {}", line.trim_end(), e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
