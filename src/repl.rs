use crate::core::db::{Flight, FlightStore};
use crate::core::{FlightError, Result};
use crate::menu::{self, MenuOption};
use crate::prompt::{self, Prompter};
use crate::report;
use chrono::Datelike;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Whether the menu loop keeps going after an option was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven controller: prompt, validate, query, print, repeat.
pub struct Controller<R, W> {
    store: FlightStore,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(store: FlightStore, input: R, output: W) -> Self {
        Controller {
            store,
            prompter: Prompter::new(input, output),
        }
    }

    /// Runs until the Exit option is chosen or input ends.
    ///
    /// Only terminal I/O failures end the loop with an error; store and
    /// formatting errors are reported and the menu is shown again.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.prompter.output(), "{}", menu::render_menu())?;

            let choice = match self.prompter.ask("Select an option: ", menu::parse_choice)? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            if self.dispatch(choice)? == Flow::Exit {
                info!("Exiting on user request");
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<Flow> {
        info!("Selected menu option {} ({})", option.number(), option.label());

        let outcome = match option {
            MenuOption::FlightById => {
                match self.prompter.ask("Enter flight ID: ", prompt::parse_flight_id)? {
                    Some(id) => self.store.flight_by_id(id),
                    None => return Ok(Flow::Exit),
                }
            }
            MenuOption::FlightsByDate => {
                match self
                    .prompter
                    .ask("Enter date in DD/MM/YYYY format: ", prompt::parse_date)?
                {
                    Some(date) => self.store.flights_by_date(date.day(), date.month(), date.year()),
                    None => return Ok(Flow::Exit),
                }
            }
            MenuOption::DelayedByAirline => {
                match self.prompter.ask("Enter airline name: ", prompt::parse_airline_name)? {
                    Some(name) => self.store.delayed_flights_by_airline(&name),
                    None => return Ok(Flow::Exit),
                }
            }
            MenuOption::DelayedByAirport => {
                match self
                    .prompter
                    .ask("Enter origin airport IATA code: ", prompt::parse_iata_code)?
                {
                    Some(code) => self.store.delayed_flights_by_airport(&code),
                    None => return Ok(Flow::Exit),
                }
            }
            MenuOption::Exit => return Ok(Flow::Exit),
        };

        self.show(outcome)?;
        Ok(Flow::Continue)
    }

    fn show(&mut self, outcome: Result<Vec<Flight>>) -> Result<()> {
        let out = self.prompter.output();
        match outcome {
            Ok(flights) => match report::write_results(out, &flights) {
                Ok(()) => {}
                Err(FlightError::Io(e)) => return Err(FlightError::Io(e)),
                Err(e) => {
                    warn!("Stopped rendering results: {}", e);
                    writeln!(out, "Error showing results: {}", e)?;
                }
            },
            Err(e) => {
                warn!("Query failed: {}", e);
                writeln!(out, "Error querying flights: {}", e)?;
            }
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

/// Runs the interactive session on the process's stdin and stdout.
pub fn run_repl(store: FlightStore) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Controller::new(store, stdin.lock(), stdout.lock()).run()
}
