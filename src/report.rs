use crate::core::db::Flight;
use crate::core::{FlightError, Result};
use std::io::Write;

pub fn results_header(count: usize) -> String {
    format!("Got {} results.", count)
}

fn required<'a>(value: &'a Option<String>, column: &str, id: i64) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| FlightError::Format(format!("missing {} for flight {}", column, id)))
}

/// Renders one result line. The delay suffix is only shown for positive delays.
pub fn format_flight(flight: &Flight) -> Result<String> {
    let delay = flight.delay_minutes()?;
    let origin = required(&flight.origin, "ORIGIN_AIRPORT", flight.id)?;
    let destination = required(&flight.destination, "DESTINATION_AIRPORT", flight.id)?;
    let airline = required(&flight.airline, "AIRLINE", flight.id)?;

    if delay > 0 {
        Ok(format!(
            "{}. {} -> {} by {}, Delay: {} Minutes",
            flight.id, origin, destination, airline, delay
        ))
    } else {
        Ok(format!("{}. {} -> {} by {}", flight.id, origin, destination, airline))
    }
}

/// Writes the header and one line per flight.
///
/// Stops at the first row that cannot be formatted; lines already written stay written.
pub fn write_results<W: Write>(out: &mut W, flights: &[Flight]) -> Result<()> {
    writeln!(out, "{}", results_header(flights.len()))?;
    for flight in flights {
        let line = format_flight(flight)?;
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
