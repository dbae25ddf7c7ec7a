//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero. The
//! rendered message leads with a stable `POKEDEX_CLI_*` code.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Stable codes for scripts that wrap the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    ConfigError,
    IoError,
    BootFailed,
}

impl CliErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "POKEDEX_CLI_CONFIG_ERROR",
            Self::IoError => "POKEDEX_CLI_IO_ERROR",
            Self::BootFailed => "POKEDEX_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file unreadable, unparsable or invalid after overrides
    #[error("POKEDEX_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// Writing to stdout failed
    #[error("POKEDEX_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("POKEDEX_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime, seeding or listener failure while starting the server
    #[error("POKEDEX_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    pub fn code(&self) -> CliErrorCode {
        match self {
            Self::Config(_) => CliErrorCode::ConfigError,
            Self::Io(_) | Self::Json(_) => CliErrorCode::IoError,
            Self::BootFailed(_) => CliErrorCode::BootFailed,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
