//! Lexigrade command line interface.
//!
//! Every command prints one JSON document on stdout; failures print
//! `{"error": "..."}` and exit with a non-zero status. Logs go to stderr.

pub mod args;
pub mod commands;
pub mod console;

pub use args::{CalibrateCommand, Cli, Command};
pub use commands::{error_value, load_config, Context};
