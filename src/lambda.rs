//! # Function Adapter
//!
//! Runs the resource handler behind an API gateway proxy integration. Gateway
//! events are normalized into [`ApiRequest`]s; the `{id}` route parameter
//! arrives as a path parameter.

use std::sync::Arc;

use lambda_http::{service_fn, Body, Error, Request, RequestExt, Response};
use tracing::info;

use crate::api::{ApiRequest, ApiResponse, PokemonHandler};
use crate::config::ServiceConfig;
use crate::store::DynamoStore;

/// Normalize a gateway event
pub fn to_api_request(event: &Request) -> ApiRequest {
    let id = event
        .path_parameters()
        .first("id")
        .map(str::to_string);

    let body = match event.body() {
        Body::Empty => None,
        Body::Text(text) if text.is_empty() => None,
        Body::Text(text) => Some(text.clone()),
        Body::Binary(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
    };

    ApiRequest {
        method: event.method().clone(),
        id,
        body,
    }
}

/// Render a normalized response for the gateway
pub fn to_lambda_response(response: ApiResponse) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in response.headers.iter() {
        builder = builder.header(name, value);
    }

    let body = if response.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(response.body)
    };

    Ok(builder.body(body)?)
}

/// Handle one invocation
pub async fn handle(handler: &PokemonHandler, event: Request) -> Result<Response<Body>, Error> {
    let request = to_api_request(&event);
    let response = handler.dispatch(request).await;
    to_lambda_response(response)
}

/// Serve invocations until the runtime shuts the function down
pub async fn run(config: ServiceConfig) -> Result<(), Error> {
    let store = DynamoStore::from_env(config.table_name.clone()).await;
    info!(
        table_name = %store.table_name(),
        update_policy = %config.update_policy,
        "initialising function runtime"
    );

    let handler = PokemonHandler::with_policy(Arc::new(store), config.update_policy);
    lambda_http::run(service_fn(|event: Request| handle(&handler, event))).await
}
