//! Shared handler state and request extraction helpers

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use crate::store::{Database, NamePolicy};
use crate::validation::{object_body, Body, FieldError, ValidationErrors};

use super::errors::{ApiError, ApiResult};

/// State shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub name_policy: NamePolicy,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            name_policy: NamePolicy::default(),
        }
    }

    pub fn with_name_policy(mut self, name_policy: NamePolicy) -> Self {
        self.name_policy = name_policy;
        self
    }
}

/// Resolves a path id. Anything that is not an integer names no entity.
pub fn path_id(raw: &str, not_found: &'static str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::NotFound(not_found))
}

/// Unwraps a JSON request body into its top-level object.
///
/// A missing, mistyped or unparseable body counts as absent.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Body> {
    let Json(value) = body.map_err(|rejection| {
        debug!(%rejection, "unusable request body");
        ApiError::from(ValidationErrors::from(FieldError::body_required()))
    })?;

    Ok(object_body(value)?)
}
