// Core infrastructure modules
pub mod core;

// Interactive front end
pub mod config;
pub mod menu;
pub mod prompt;
pub mod repl;
pub mod report;

#[cfg(test)]
pub(crate) mod test_utils;
