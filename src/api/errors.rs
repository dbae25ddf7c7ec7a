//! # API Errors
//!
//! Two outcomes reach clients: not found (404) and internal failure (500).
//! Internal failures carry the error string in the body.

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Resource handler errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No record under the requested id
    #[error("Pokemon not found")]
    NotFound,

    /// Request body lacks `name` or `type`
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Route needs an `{id}` that was not supplied
    #[error("missing path parameter: {0}")]
    MissingPathParam(&'static str),

    /// Body is absent, not JSON, or not an object
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingField(_)
            | ApiError::MissingPathParam(_)
            | ApiError::InvalidBody(_)
            | ApiError::UnsupportedMethod(_)
            | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
