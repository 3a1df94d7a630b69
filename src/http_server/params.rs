//! # Query Parameter Parser
//!
//! Turns raw query strings into store queries. Listing parameters are
//! permissive: a value that does not parse is dropped, not reported.

use std::collections::HashMap;

use crate::model::Strength;
use crate::store::{HeroPowerQuery, Page, SearchScope};

use super::errors::{ApiError, ApiResult};

/// Per-class result cap of `GET /search` when `limit` is absent
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Parses `GET /hero_powers` parameters.
///
/// `offset` only takes effect together with `limit`.
pub fn hero_power_query(params: &HashMap<String, String>) -> HeroPowerQuery {
    let limit = params.get("limit").and_then(|v| parse_u32(v));
    let offset = params.get("offset").and_then(|v| parse_u32(v)).unwrap_or(0);

    HeroPowerQuery {
        hero_id: params.get("hero_id").and_then(|v| parse_id(v)),
        power_id: params.get("power_id").and_then(|v| parse_id(v)),
        strength: params.get("strength").and_then(|v| v.parse::<Strength>().ok()),
        hero_search: non_empty(params.get("hero_search")),
        power_search: non_empty(params.get("power_search")),
        page: limit.map(|limit| Page { limit, offset }),
    }
}

/// Parsed `GET /search` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    /// The `type` value as given
    pub search_type: String,
    /// `None` when `type` names no known class
    pub scope: Option<SearchScope>,
    pub limit: u32,
}

impl SearchParams {
    pub fn parse(params: &HashMap<String, String>) -> ApiResult<Self> {
        let query = params
            .get("q")
            .filter(|q| !q.trim().is_empty())
            .cloned()
            .ok_or_else(|| ApiError::validation("Query parameter \"q\" is required"))?;

        let search_type = params
            .get("type")
            .cloned()
            .unwrap_or_else(|| "all".to_string());
        let scope = SearchScope::parse(&search_type);

        let limit = params
            .get("limit")
            .and_then(|v| parse_u32(v))
            .unwrap_or(DEFAULT_SEARCH_LIMIT);

        Ok(Self {
            query,
            search_type,
            scope,
            limit,
        })
    }
}

fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
