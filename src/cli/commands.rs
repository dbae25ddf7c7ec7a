//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::api::PokemonHandler;
use crate::config::ServiceConfig;
use crate::http_server::HttpServer;
use crate::seed::{self, SEED};
use crate::store::MemoryStore;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            no_seed,
        } => {
            let config = resolve_config(config.as_deref(), port, no_seed)?;
            serve(config)
        }
        Command::SeedList => seed_list(),
    }
}

/// File config (or defaults) with command-line overrides applied
pub fn resolve_config(
    config_path: Option<&Path>,
    port: Option<u16>,
    no_seed: bool,
) -> CliResult<ServiceConfig> {
    let mut config = match config_path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(port) = port {
        config.port = port;
    }
    if no_seed {
        config.seed = false;
    }

    config.validate()?;
    Ok(config)
}

/// Run the local server until interrupted
///
/// 1. Build the in-memory store and handler
/// 2. Seed the store unless disabled
/// 3. Serve on the configured address
pub fn serve(config: ServiceConfig) -> CliResult<()> {
    crate::logging::init();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let handler =
            PokemonHandler::with_policy(Arc::new(MemoryStore::new()), config.update_policy);

        if config.seed {
            let count = seed::seed(&handler)
                .await
                .map_err(|e| CliError::boot_failed(format!("Seeding failed: {}", e)))?;
            info!(count, "seeded in-memory store");
        }

        HttpServer::new(handler, config)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the seed catalogue
pub fn seed_list() -> CliResult<()> {
    let entries = SEED
        .iter()
        .map(|entry| -> CliResult<Value> {
            let mut value = serde_json::to_value(entry)?;
            value["image"] = Value::String(entry.image_url());
            Ok(value)
        })
        .collect::<CliResult<Vec<_>>>()?;
    write_json(&entries)
}
