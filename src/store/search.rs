//! Free-text search across entity classes
//!
//! Read-only. Each class is searched and limited on its own; a class with
//! no matches yields an empty list.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite};

use crate::model::HeroPowerRecord;

use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::query::{contains_pattern, into_records, push_any_contains, HeroPowerRow, RECORD_SELECT};

/// Which entity classes a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    All,
    Heroes,
    Powers,
    Relationships,
}

impl SearchScope {
    /// Parses the `type` parameter. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(SearchScope::All),
            "heroes" => Some(SearchScope::Heroes),
            "powers" => Some(SearchScope::Powers),
            "relationships" => Some(SearchScope::Relationships),
            _ => None,
        }
    }

    pub fn includes_heroes(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Heroes)
    }

    pub fn includes_powers(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Powers)
    }

    pub fn includes_relationships(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Relationships)
    }
}

/// A hero whose name or super name matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HeroMatch {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub powers_count: i64,
}

/// A power whose name or description matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PowerMatch {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub heroes_count: i64,
}

impl Database {
    pub async fn search_heroes(&self, term: &str, limit: u32) -> StoreResult<Vec<HeroMatch>> {
        let pattern = contains_pattern(term);
        sqlx::query_as::<_, HeroMatch>(
            r"SELECT h.id, h.name, h.super_name, COUNT(hp.id) AS powers_count
              FROM heroes h
              LEFT JOIN hero_powers hp ON hp.hero_id = h.id
              WHERE h.name LIKE ? ESCAPE '\' OR h.super_name LIKE ? ESCAPE '\'
              GROUP BY h.id
              ORDER BY h.id
              LIMIT ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::query)
    }

    pub async fn search_powers(&self, term: &str, limit: u32) -> StoreResult<Vec<PowerMatch>> {
        let pattern = contains_pattern(term);
        sqlx::query_as::<_, PowerMatch>(
            r"SELECT p.id, p.name, p.description, COUNT(hp.id) AS heroes_count
              FROM powers p
              LEFT JOIN hero_powers hp ON hp.power_id = p.id
              WHERE p.name LIKE ? ESCAPE '\' OR p.description LIKE ? ESCAPE '\'
              GROUP BY p.id
              ORDER BY p.id
              LIMIT ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::query)
    }

    /// Links whose hero name, hero super name, power name or strength matched
    pub async fn search_relationships(&self, term: &str, limit: u32) -> StoreResult<Vec<HeroPowerRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(RECORD_SELECT);
        builder.push(" WHERE 1 = 1");
        push_any_contains(
            &mut builder,
            &["h.name", "h.super_name", "p.name", "hp.strength"],
            term,
        );
        builder.push(" ORDER BY hp.id LIMIT ").push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<HeroPowerRow>()
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::query)?;

        into_records(rows)
    }
}
