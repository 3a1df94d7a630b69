//! Hero HTTP Routes
//!
//! `/heroes` and `/heroes/{id}`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::model::Hero;
use crate::validation::{HeroPatch, NewHero};

use super::errors::{ApiError, ApiResult};
use super::response::{HeroDetail, MessageResponse};
use super::state::{json_body, path_id, AppState};

const NOT_FOUND: &str = "Hero not found";

// ==================
// Hero Routes
// ==================

/// Create hero routes
pub fn hero_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/heroes", get(list_heroes_handler).post(create_hero_handler))
        .route(
            "/heroes/{id}",
            get(get_hero_handler)
                .patch(update_hero_handler)
                .delete(delete_hero_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_heroes_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Hero>>> {
    let heroes = state
        .db
        .list_heroes()
        .await
        .map_err(|e| ApiError::store("Failed to list heroes", e))?;
    Ok(Json(heroes))
}

async fn create_hero_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Hero>)> {
    let body = json_body(body)?;
    let new = NewHero::from_body(&body)?;

    let hero = state
        .db
        .create_hero(&new, state.name_policy)
        .await
        .map_err(|e| ApiError::store("Failed to create hero", e))?;

    Ok((StatusCode::CREATED, Json(hero)))
}

async fn get_hero_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<HeroDetail>> {
    let id = path_id(&id, NOT_FOUND)?;

    let (hero, links) = state
        .db
        .hero_with_links(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch hero", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(HeroDetail::new(hero, links)))
}

async fn update_hero_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Hero>> {
    let id = path_id(&id, NOT_FOUND)?;
    // An unknown id answers 404 even when the body is also invalid
    if state
        .db
        .find_hero(id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch hero", e))?
        .is_none()
    {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    let body = json_body(body)?;
    let patch = HeroPatch::from_body(&body)?;

    let hero = state
        .db
        .update_hero(id, &patch)
        .await
        .map_err(|e| ApiError::store("Failed to update hero", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(hero))
}

async fn delete_hero_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(&id, NOT_FOUND)?;

    let hero = state
        .db
        .delete_hero(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete hero", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(Json(MessageResponse::hero_deleted(&hero)))
}
