//! Search and Statistics HTTP Routes
//!
//! Read-only compositions over the store. Zero matches is an empty list,
//! never an error.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::store::Stats;

use super::errors::{ApiError, ApiResult};
use super::params::SearchParams;
use super::response::{PowerPreview, RelationshipMatch, SearchResponse, SearchResults};
use super::state::AppState;

/// Create search and stats routes
pub fn search_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<SearchResponse>> {
    let params = SearchParams::parse(&params)?;
    let term = params.query.as_str();
    let mut results = SearchResults::default();

    if let Some(scope) = params.scope {
        if scope.includes_heroes() {
            let heroes = state
                .db
                .search_heroes(term, params.limit)
                .await
                .map_err(|e| ApiError::store("Failed to search heroes", e))?;
            results.heroes = Some(heroes);
        }

        if scope.includes_powers() {
            let powers = state
                .db
                .search_powers(term, params.limit)
                .await
                .map_err(|e| ApiError::store("Failed to search powers", e))?;
            results.powers = Some(powers.into_iter().map(PowerPreview::from).collect());
        }

        if scope.includes_relationships() {
            let records = state
                .db
                .search_relationships(term, params.limit)
                .await
                .map_err(|e| ApiError::store("Failed to search relationships", e))?;
            results.relationships = Some(records.into_iter().map(RelationshipMatch::from).collect());
        }
    }

    Ok(Json(SearchResponse {
        query: params.query,
        search_type: params.search_type,
        results,
    }))
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Stats>> {
    let stats = state
        .db
        .stats()
        .await
        .map_err(|e| ApiError::store("Failed to compute stats", e))?;
    Ok(Json(stats))
}
