//! Hero-Power HTTP Routes
//!
//! `/hero_powers` and `/hero_powers/{id}`. Every response carries the full
//! record with both the hero and the power embedded.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::model::HeroPowerRecord;
use crate::validation::{HeroPowerPatch, NewHeroPower};

use super::errors::{ApiError, ApiResult};
use super::params::hero_power_query;
use super::response::MessageResponse;
use super::state::{json_body, path_id, AppState};

const NOT_FOUND: &str = "HeroPower not found";

// ==================
// Hero-Power Routes
// ==================

/// Create hero-power routes
pub fn hero_power_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/hero_powers",
            get(list_hero_powers_handler).post(create_hero_power_handler),
        )
        .route(
            "/hero_powers/{id}",
            get(get_hero_power_handler)
                .patch(update_hero_power_handler)
                .delete(delete_hero_power_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_hero_powers_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<HeroPowerRecord>>> {
    let query = hero_power_query(&params);

    let records = state
        .db
        .query_hero_powers(&query)
        .await
        .map_err(|e| ApiError::store("Failed to list hero powers", e))?;

    Ok(Json(records))
}

/// Shape is checked first; reference resolution happens inside the
/// store's insert transaction.
async fn create_hero_power_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HeroPowerRecord>)> {
    let body = json_body(body)?;
    let new = NewHeroPower::from_body(&body)?;

    let record = state
        .db
        .create_hero_power(&new)
        .await
        .map_err(|e| ApiError::store("Failed to create hero power", e))?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_hero_power_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<HeroPowerRecord>> {
    let id = path_id(&id, NOT_FOUND)?;

    let record = state
        .db
        .find_hero_power(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch hero power", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(record))
}

async fn update_hero_power_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<HeroPowerRecord>> {
    let id = path_id(&id, NOT_FOUND)?;
    // An unknown id answers 404 even when the body is also invalid
    if state
        .db
        .find_hero_power(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch hero power", e))?
        .is_none()
    {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    let body = json_body(body)?;
    let patch = HeroPowerPatch::from_body(&body)?;

    let record = state
        .db
        .update_hero_power(id, &patch)
        .await
        .map_err(|e| ApiError::store("Failed to update hero power", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(record))
}

async fn delete_hero_power_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(&id, NOT_FOUND)?;

    let record = state
        .db
        .delete_hero_power(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete hero power", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(MessageResponse::hero_power_deleted(&record)))
}
