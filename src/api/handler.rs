//! # Pokemon Resource Handler
//!
//! Maps a normalized request onto exactly one key-value store operation and
//! renders the outcome as a normalized response.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use tracing::{debug, error, info};

use super::errors::{ApiError, ApiResult};
use super::request::ApiRequest;
use super::response::ApiResponse;
use crate::model::{Pokemon, PokemonFields};
use crate::store::{PokemonStore, UpdatePolicy};

/// CRUD operations over a [`PokemonStore`]
#[derive(Clone)]
pub struct PokemonHandler {
    store: Arc<dyn PokemonStore>,
    update_policy: UpdatePolicy,
}

impl PokemonHandler {
    pub fn new(store: Arc<dyn PokemonStore>) -> Self {
        Self::with_policy(store, UpdatePolicy::default())
    }

    pub fn with_policy(store: Arc<dyn PokemonStore>, update_policy: UpdatePolicy) -> Self {
        Self {
            store,
            update_policy,
        }
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        self.update_policy
    }

    /// All stored records, unordered
    pub async fn list(&self) -> ApiResult<Vec<Pokemon>> {
        Ok(self.store.scan().await?)
    }

    pub async fn get(&self, id: &str) -> ApiResult<Pokemon> {
        self.store.get(id).await?.ok_or(ApiError::NotFound)
    }

    /// Store a new record under a generated id
    pub async fn create(&self, fields: PokemonFields) -> ApiResult<Pokemon> {
        let pokemon = fields.into_new_record();
        self.store.put(&pokemon).await?;
        info!(id = %pokemon.id, name = %pokemon.name, "pokemon created");
        Ok(pokemon)
    }

    /// Replace every mutable field of `id`
    pub async fn update(&self, id: &str, fields: PokemonFields) -> ApiResult<Pokemon> {
        let pokemon = fields.into_record(id);
        let updated = self
            .store
            .update(&pokemon, self.update_policy)
            .await?
            .ok_or(ApiError::NotFound)?;
        info!(id = %id, policy = %self.update_policy, "pokemon updated");
        Ok(updated)
    }

    /// Remove `id`; absent ids succeed
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.store.delete(id).await?;
        info!(id = %id, "pokemon deleted");
        Ok(())
    }

    /// Route a request to its operation and render the result.
    ///
    /// Never fails: errors become 404/500 responses.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        let method = request.method.clone();
        let id = request.id.clone();

        match self.route(request).await {
            Ok(response) => {
                debug!(method = %method, id = ?id, status = response.status.as_u16(), "request handled");
                response
            }
            Err(err) => {
                if err.is_not_found() {
                    debug!(method = %method, id = ?id, "pokemon not found");
                } else {
                    error!(method = %method, id = ?id, error = %err, "request failed");
                }
                ApiResponse::error(&err)
            }
        }
    }

    async fn route(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        match request.method.clone() {
            Method::GET => match request.id.as_deref() {
                Some(id) => {
                    let pokemon = self.get(id).await?;
                    Ok(ApiResponse::json(StatusCode::OK, &pokemon))
                }
                None => {
                    let all = self.list().await?;
                    Ok(ApiResponse::json(StatusCode::OK, &all))
                }
            },
            Method::POST => {
                let fields = PokemonFields::from_json(request.require_body()?)?;
                let pokemon = self.create(fields).await?;
                Ok(ApiResponse::json(StatusCode::CREATED, &pokemon))
            }
            Method::PUT => {
                let id = request.require_id()?;
                let fields = PokemonFields::from_json(request.require_body()?)?;
                let pokemon = self.update(id, fields).await?;
                Ok(ApiResponse::json(StatusCode::OK, &pokemon))
            }
            Method::DELETE => {
                self.delete(request.require_id()?).await?;
                Ok(ApiResponse::empty(StatusCode::NO_CONTENT))
            }
            Method::OPTIONS => Ok(ApiResponse::empty(StatusCode::OK)),
            other => Err(ApiError::UnsupportedMethod(other.to_string())),
        }
    }
}
