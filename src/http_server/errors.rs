//! # API Errors
//!
//! Every failure a handler can return, and its HTTP status and body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::store::StoreError;
use crate::validation::ValidationErrors;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path-identified entity absent, or no such route
    #[error("{0}")]
    NotFound(&'static str),

    /// Field rule violated, body malformed, or reference unresolved
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The store rejected a write on a constraint the pre-checks missed
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Known route, wrong verb
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Any other persistence or runtime fault
    #[error("{context}: {detail}")]
    Internal { context: String, detail: String },
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Integrity(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translates a store failure. `context` names the operation and
    /// prefixes the body of a 500.
    pub fn store(context: &str, err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => errors.into(),
            StoreError::Constraint { message } => {
                debug!(context, %message, "store constraint rejected write");
                ApiError::Integrity(message)
            }
            other => {
                error!(context, error = %other, "internal failure");
                ApiError::Internal {
                    context: context.to_string(),
                    detail: other.to_string(),
                }
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![message.into()])
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let messages = errors.messages();
        debug!(errors = ?messages, "request rejected");
        ApiError::Validation(messages)
    }
}

/// `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `{"errors": ["...", ...]}`
#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    pub errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => (status, Json(ErrorsResponse { errors })).into_response(),
            ApiError::Integrity(message) => (
                status,
                Json(ErrorsResponse {
                    errors: vec![message],
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
