//! CLI argument definitions using clap
//!
//! Commands:
//! - pokedex serve [--config <path>] [--port <port>] [--no-seed]
//! - pokedex seed-list

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pokedex - a CRUD API for Pokemon records
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the local API server with an in-memory store
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Start with an empty store
        #[arg(long)]
        no_seed: bool,
    },

    /// Print the seed catalogue as JSON
    SeedList,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
