//! HTTP contract tests for the local server
//!
//! Drives the axum router in-process and checks the CRUD properties:
//! unique ids, read-after-create, delete idempotence, list completeness,
//! update visibility, and CORS headers on every response.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use pokedex::api::PokemonHandler;
use pokedex::config::ServiceConfig;
use pokedex::http_server::HttpServer;
use pokedex::model::Pokemon;
use pokedex::store::{MemoryStore, PokemonStore, StoreError, StoreResult, UpdatePolicy};

/// Store whose every operation fails with a backend error
struct FailingStore;

#[async_trait]
impl PokemonStore for FailingStore {
    async fn get(&self, _id: &str) -> StoreResult<Option<Pokemon>> {
        Err(StoreError::Backend("boom".to_string()))
    }

    async fn scan(&self) -> StoreResult<Vec<Pokemon>> {
        Err(StoreError::Backend("boom".to_string()))
    }

    async fn put(&self, _pokemon: &Pokemon) -> StoreResult<()> {
        Err(StoreError::Backend("boom".to_string()))
    }

    async fn update(
        &self,
        _pokemon: &Pokemon,
        _policy: UpdatePolicy,
    ) -> StoreResult<Option<Pokemon>> {
        Err(StoreError::Backend("boom".to_string()))
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::Backend("boom".to_string()))
    }
}

fn router_with_policy(policy: UpdatePolicy) -> Router {
    let handler = PokemonHandler::with_policy(Arc::new(MemoryStore::new()), policy);
    HttpServer::new(handler, ServiceConfig::default()).router()
}

fn router() -> Router {
    router_with_policy(UpdatePolicy::Reject)
}

async fn send_raw(router: &Router, method: Method, uri: &str, body: Vec<u8>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(router: &Router, name: &str, kind: &str) -> Value {
    let response = send(
        router,
        Method::POST,
        "/pokemons",
        Some(json!({"name": name, "type": kind})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_create_returns_full_record() {
    let router = router();
    let response = send(
        &router,
        Method::POST,
        "/pokemons",
        Some(json!({"name": "Pikachu", "type": "Electric"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_cors(&response);
    assert_eq!(response.headers()["content-type"], "application/json");

    let created = json_body(response).await;
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(created["name"], "Pikachu");
    assert_eq!(created["type"], "Electric");
    assert_eq!(created["image"], "");
    assert_eq!(created["pokedexNumber"], 0);
    assert_eq!(created["level"], 1);
    assert_eq!(created["hp"], 100);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let router = router();
    let mut ids = HashSet::new();

    for i in 0..20 {
        let created = create(&router, &format!("Unown-{}", i), "Psychic").await;
        assert!(ids.insert(created["id"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn test_get_after_create() {
    let router = router();
    let response = send(
        &router,
        Method::POST,
        "/pokemons",
        Some(json!({
            "name": "Squirtle",
            "type": "Water",
            "image": "https://example.com/7.png",
            "pokedexNumber": 7,
            "level": 5,
            "hp": 44
        })),
    )
    .await;
    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap();

    let response = send(&router, Method::GET, &format!("/pokemons/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let router = router();
    let response = send(&router, Method::GET, "/pokemons/does-not-exist", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
    assert_eq!(json_body(response).await, json!({"error": "Pokemon not found"}));
}

#[tokio::test]
async fn test_delete_then_get() {
    let router = router();
    let created = create(&router, "Caterpie", "Bug").await;
    let uri = format!("/pokemons/{}", created["id"].as_str().unwrap());

    let response = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors(&response);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let response = send(&router, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_is_idempotent() {
    let router = router();

    for _ in 0..2 {
        let response = send(&router, Method::DELETE, "/pokemons/never-existed", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_list_returns_exactly_created_records() {
    let router = router();

    let response = send(&router, Method::GET, "/pokemons", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));

    let mut expected = HashSet::new();
    for (name, kind) in [("Ekans", "Poison"), ("Arbok", "Poison"), ("Spearow", "Normal")] {
        let created = create(&router, name, kind).await;
        expected.insert(created.to_string());
    }

    let response = send(&router, Method::GET, "/pokemons", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed: HashSet<String> = json_body(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(Value::to_string)
        .collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_update_then_get() {
    let router = router();
    let created = create(&router, "Charmander", "Fire").await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/pokemons/{}", id);

    let response = send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({"name": "Charmeleon", "type": "Fire", "level": 16, "hp": 58})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let updated = json_body(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Charmeleon");
    assert_eq!(updated["level"], 16);

    let response = send(&router, Method::GET, &uri, None).await;
    assert_eq!(json_body(response).await, updated);
}

#[tokio::test]
async fn test_update_ignores_body_id() {
    let router = router();
    let created = create(&router, "Pidgey", "Normal").await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &router,
        Method::PUT,
        &format!("/pokemons/{}", id),
        Some(json!({"id": "other", "name": "Pidgeotto", "type": "Normal"})),
    )
    .await;
    assert_eq!(json_body(response).await["id"], id);

    let response = send(&router, Method::GET, "/pokemons/other", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_rejected() {
    let router = router();
    let response = send(
        &router,
        Method::PUT,
        "/pokemons/ghost",
        Some(json!({"name": "Gastly", "type": "Ghost"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&router, Method::GET, "/pokemons", None).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_update_missing_upserted() {
    let router = router_with_policy(UpdatePolicy::Upsert);
    let response = send(
        &router,
        Method::PUT,
        "/pokemons/ghost",
        Some(json!({"name": "Gastly", "type": "Ghost"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, Method::GET, "/pokemons/ghost", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Gastly");
}

#[tokio::test]
async fn test_missing_required_field() {
    let router = router();
    let response = send(
        &router,
        Method::POST,
        "/pokemons",
        Some(json!({"type": "Electric"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert_eq!(
        json_body(response).await,
        json!({"error": "missing required field: name"})
    );
}

#[tokio::test]
async fn test_invalid_json_body() {
    let router = router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/pokemons")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body"));
}

#[tokio::test]
async fn test_preflight() {
    let router = router();

    for uri in ["/pokemons", "/pokemons/any-id"] {
        let response = send(&router, Method::OPTIONS, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
    }
}

#[tokio::test]
async fn test_health() {
    let router = router();
    let response = send(&router, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_pokedex_number_string_is_stored() {
    let router = router();
    let response = send(
        &router,
        Method::POST,
        "/pokemons",
        Some(json!({"name": "Pikachu", "type": "electric", "image": "x", "pokedexNumber": "25"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["pokedexNumber"], 25);

    let uri = format!("/pokemons/{}", created["id"].as_str().unwrap());
    let response = send(&router, Method::GET, &uri, None).await;
    assert_eq!(json_body(response).await["pokedexNumber"], 25);
}

#[tokio::test]
async fn test_non_numeric_pokedex_number() {
    let router = router();
    let response = send(
        &router,
        Method::POST,
        "/pokemons",
        Some(json!({"name": "Pikachu", "type": "Electric", "pokedexNumber": "pika"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert_eq!(
        json_body(response).await,
        json!({"error": "invalid request body: pokedexNumber must be an integer"})
    );
}

#[tokio::test]
async fn test_invalid_utf8_body() {
    let router = router();
    let response = send_raw(&router, Method::POST, "/pokemons", vec![0xff, 0xfe, b'{']).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body"));
}

#[tokio::test]
async fn test_large_body_accepted() {
    let router = router();
    let image = format!("https://example.com/{}.png", "a".repeat(3 * 1024 * 1024));
    let body = json!({"name": "Snorlax", "type": "Normal", "image": image});

    let response = send_raw(&router, Method::POST, "/pokemons", body.to_string().into_bytes()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_cors(&response);
    assert_eq!(json_body(response).await["image"], image);
}

#[tokio::test]
async fn test_store_failure_on_every_route() {
    let handler = PokemonHandler::new(Arc::new(FailingStore));
    let router = HttpServer::new(handler, ServiceConfig::default()).router();
    let fields = json!({"name": "Mewtwo", "type": "Psychic"});

    let cases = [
        (Method::GET, "/pokemons", None),
        (Method::GET, "/pokemons/150", None),
        (Method::POST, "/pokemons", Some(fields.clone())),
        (Method::PUT, "/pokemons/150", Some(fields)),
        (Method::DELETE, "/pokemons/150", None),
    ];

    for (method, uri, body) in cases {
        let response = send(&router, method.clone(), uri, body).await;
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{} {}",
            method,
            uri
        );
        assert_cors(&response);
        assert_eq!(json_body(response).await, json!({"error": "boom"}));
    }
}
