use crate::core::{FlightError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

/// Database location used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "data/flights.sqlite3";
/// Names an explicit configuration file.
pub const CONFIG_ENV: &str = "FLIGHTQ_CONFIG";
/// Overrides the database path from any configuration file.
pub const DB_ENV: &str = "FLIGHTQ_DB";
/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "flightq.toml";

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Where the flights store lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Diagnostic logging, written to stderr.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text. Missing sections fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| FlightError::Config(e.to_string()))
    }

    /// The configured tracing level.
    pub fn log_level(&self) -> Result<Level> {
        self.logging.level.parse::<Level>().map_err(|_| {
            FlightError::Config(format!("unknown log level `{}`", self.logging.level))
        })
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = flightq::config::load_config("flightq.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| FlightError::Config(format!("{}: {}", path.display(), e)))?;
    Config::from_toml(&content)
}

/// Files checked, in order, when `FLIGHTQ_CONFIG` is not set.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("flightq").join("config.toml"));
    }
    candidates
}

/// Resolves the effective configuration from the environment and the
/// filesystem.
///
/// An explicit `FLIGHTQ_CONFIG` must point at a readable file. Otherwise the
/// first existing candidate is used, or the defaults if there is none.
/// `FLIGHTQ_DB` is applied last.
pub fn load() -> Result<Config> {
    let mut config = match env::var_os(CONFIG_ENV) {
        Some(path) => load_config(path)?,
        None => match config_candidates().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                load_config(path)?
            }
            None => Config::default(),
        },
    };

    if let Some(db_path) = env::var_os(DB_ENV) {
        config.database.path = PathBuf::from(db_path);
    }

    Ok(config)
}
