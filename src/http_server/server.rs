//! # HTTP Server
//!
//! Local loopback shim over the resource handler. Routes only translate the
//! axum request into an [`ApiRequest`]; the handler decides everything else,
//! so the local server answers exactly like the gateway deployment.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::Method,
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{ApiRequest, ApiResponse, PokemonHandler};
use crate::config::ServiceConfig;

/// HTTP server for the Pokemon API
pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(handler: PokemonHandler, config: ServiceConfig) -> Self {
        let router = Self::build_router(handler);
        Self { config, router }
    }

    fn build_router(handler: PokemonHandler) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/pokemons", any(collection_handler))
            .route("/pokemons/:id", any(item_handler))
            .with_state(handler)
            .layer(DefaultBodyLimit::disable())
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "starting local Pokemon API server");
        info!("GET    /pokemons      - list all Pokemon");
        info!("GET    /pokemons/{{id}} - get one Pokemon");
        info!("POST   /pokemons      - create a Pokemon");
        info!("PUT    /pokemons/{{id}} - update a Pokemon");
        info!("DELETE /pokemons/{{id}} - delete a Pokemon");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Body bytes are decoded lossily, like binary payloads in the function adapter.
fn normalized(method: Method, id: Option<String>, body: Bytes) -> ApiRequest {
    ApiRequest {
        method,
        id,
        body: if body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&body).into_owned())
        },
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// `/pokemons`
async fn collection_handler(
    State(handler): State<PokemonHandler>,
    method: Method,
    body: Bytes,
) -> ApiResponse {
    handler.dispatch(normalized(method, None, body)).await
}

/// `/pokemons/{id}`
async fn item_handler(
    State(handler): State<PokemonHandler>,
    method: Method,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResponse {
    handler.dispatch(normalized(method, Some(id), body)).await
}
