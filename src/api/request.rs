//! Normalized request consumed by the resource handler.
//!
//! Transports fill this from whatever they receive: a gateway proxy event or
//! a local HTTP request.

use axum::http::Method;

use super::errors::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// The `{id}` path parameter, when the route has one
    pub id: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            id: None,
            body: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Path id, required by update and delete
    pub fn require_id(&self) -> ApiResult<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingPathParam("id"))
    }

    pub fn require_body(&self) -> ApiResult<&str> {
        self.body
            .as_deref()
            .ok_or_else(|| ApiError::InvalidBody("request body is empty".to_string()))
    }
}
