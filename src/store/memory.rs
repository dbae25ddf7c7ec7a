//! In-memory store used by the local server and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{PokemonStore, StoreError, StoreResult, UpdatePolicy};
use crate::model::Pokemon;

/// Records keyed by id behind a single lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Pokemon>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> StoreResult<usize> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl PokemonStore for MemoryStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Pokemon>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(id).cloned())
    }

    async fn scan(&self) -> StoreResult<Vec<Pokemon>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.values().cloned().collect())
    }

    async fn put(&self, pokemon: &Pokemon) -> StoreResult<()> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(pokemon.id.clone(), pokemon.clone());
        Ok(())
    }

    async fn update(
        &self,
        pokemon: &Pokemon,
        policy: UpdatePolicy,
    ) -> StoreResult<Option<Pokemon>> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        match data.get_mut(&pokemon.id) {
            Some(existing) => {
                existing.clone_from(pokemon);
                Ok(Some(existing.clone()))
            }
            None if policy == UpdatePolicy::Upsert => {
                data.insert(pokemon.id.clone(), pokemon.clone());
                Ok(Some(pokemon.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.remove(id);
        Ok(())
    }
}
