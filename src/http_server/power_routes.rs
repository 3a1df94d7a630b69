//! Power HTTP Routes
//!
//! `/powers` and `/powers/{id}`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::model::Power;
use crate::validation::{NewPower, PowerPatch};

use super::errors::{ApiError, ApiResult};
use super::response::{MessageResponse, PowerDetail};
use super::state::{json_body, path_id, AppState};

const NOT_FOUND: &str = "Power not found";

// ==================
// Power Routes
// ==================

/// Create power routes
pub fn power_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/powers", get(list_powers_handler).post(create_power_handler))
        .route(
            "/powers/{id}",
            get(get_power_handler)
                .patch(update_power_handler)
                .delete(delete_power_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_powers_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Power>>> {
    let powers = state
        .db
        .list_powers()
        .await
        .map_err(|e| ApiError::store("Failed to list powers", e))?;
    Ok(Json(powers))
}

async fn create_power_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Power>)> {
    let body = json_body(body)?;
    let new = NewPower::from_body(&body)?;

    let power = state
        .db
        .create_power(&new, state.name_policy)
        .await
        .map_err(|e| ApiError::store("Failed to create power", e))?;

    Ok((StatusCode::CREATED, Json(power)))
}

async fn get_power_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PowerDetail>> {
    let id = path_id(&id, NOT_FOUND)?;

    let (power, links) = state
        .db
        .power_with_links(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch power", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(PowerDetail::new(power, links)))
}

async fn update_power_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Power>> {
    let id = path_id(&id, NOT_FOUND)?;
    // An unknown id answers 404 even when the body is also invalid
    if state
        .db
        .find_power(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch power", e))?
        .is_none()
    {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    let body = json_body(body)?;
    let patch = PowerPatch::from_body(&body)?;

    let power = state
        .db
        .update_power(id, &patch)
        .await
        .map_err(|e| ApiError::store("Failed to update power", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(power))
}

async fn delete_power_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(&id, NOT_FOUND)?;

    let power = state
        .db
        .delete_power(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete power", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(MessageResponse::power_deleted(&power)))
}
