//! CLI module for the Pokedex API
//!
//! Provides command-line interface for:
//! - serve: run the local server over an in-memory store
//! - seed-list: print the seed catalogue

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{resolve_config, run, run_command, seed_list, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
