//! Service Configuration
//!
//! Shared by the local server (JSON file + CLI overrides) and the function
//! deployment (environment variables). Every field has a default.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::UpdatePolicy;

/// Environment variable naming the DynamoDB table
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// Environment variable selecting the update policy
pub const UPDATE_POLICY_ENV: &str = "UPDATE_POLICY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// DynamoDB table holding the records (default: "PokemonTable")
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Behavior of PUT on an unknown id (default: reject)
    #[serde(default)]
    pub update_policy: UpdatePolicy,

    /// Pre-populate the in-memory store (default: true)
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_table_name() -> String {
    "PokemonTable".to_string()
}

fn default_seed() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            table_name: default_table_name(),
            update_policy: UpdatePolicy::default(),
            seed: default_seed(),
        }
    }
}

impl ServiceConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: ServiceConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Defaults overridden by `TABLE_NAME` and `UPDATE_POLICY`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(table_name) = env::var(TABLE_NAME_ENV) {
            config.table_name = table_name;
        }
        if let Ok(policy) = env::var(UPDATE_POLICY_ENV) {
            config.update_policy = policy.parse().map_err(ConfigError::Invalid)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid("table_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
