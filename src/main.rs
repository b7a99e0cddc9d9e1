use flightq::{config, core::db::FlightStore, repl};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = match config.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so stdout carries only prompts and results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    info!("Starting flightq...");

    let db_path = config.database.path.clone();
    let store = match FlightStore::open(db_path.clone()) {
        Ok(store) => store,
        Err(e) => {
            error!("Cannot open flights database: {}", e);
            eprintln!("Failed to open flights database {}: {}", db_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("Welcome to flightq! Using flights database: {}", store.path().display());

    match repl::run_repl(store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session ended with an error: {}", e);
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
