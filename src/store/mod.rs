//! # Key-Value Store
//!
//! The storage seam behind the resource handler. Every operation touches at
//! most one record, keyed by its identifier.
//!
//! - [`MemoryStore`] backs the local server and tests
//! - [`DynamoStore`] backs the function deployment

mod dynamo;
mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Pokemon;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failures. All of them surface to clients as internal errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing service rejected or failed the request
    #[error("{0}")]
    Backend(String),

    /// A stored item could not be read back as a record
    #[error("malformed item {id}: {reason}")]
    Malformed { id: String, reason: String },

    /// The in-memory map lock was poisoned by a panicking writer
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// What an update does when the identifier is not stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Conditional update; a missing record is reported as not found
    #[default]
    Reject,
    /// Blind overwrite; a missing record is created under the given id
    Upsert,
}

impl UpdatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePolicy::Reject => "reject",
            UpdatePolicy::Upsert => "upsert",
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(UpdatePolicy::Reject),
            "upsert" => Ok(UpdatePolicy::Upsert),
            other => Err(format!(
                "invalid update policy '{}': expected 'reject' or 'upsert'",
                other
            )),
        }
    }
}

/// Single-table key-value store keyed by record id
#[async_trait]
pub trait PokemonStore: Send + Sync {
    /// Fetch one record
    async fn get(&self, id: &str) -> StoreResult<Option<Pokemon>>;

    /// Every stored record, in no particular order
    async fn scan(&self) -> StoreResult<Vec<Pokemon>>;

    /// Insert or replace a record under its id
    async fn put(&self, pokemon: &Pokemon) -> StoreResult<()>;

    /// Replace the mutable fields of `pokemon.id`.
    ///
    /// Returns the stored record after the update, or `None` when the policy
    /// is [`UpdatePolicy::Reject`] and the id is not stored.
    async fn update(&self, pokemon: &Pokemon, policy: UpdatePolicy)
        -> StoreResult<Option<Pokemon>>;

    /// Remove a record. Removing an absent id is not an error.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
