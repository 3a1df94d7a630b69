//! Aggregate counts over the whole store

use serde::Serialize;
use sqlx::SqliteConnection;

use crate::model::Strength;

use super::database::Database;
use super::errors::{StoreError, StoreResult};

/// How many entries the ranked lists hold
pub const TOP_N: i64 = 5;

/// Link count per strength level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrengthDistribution {
    #[serde(rename = "Strong")]
    pub strong: i64,
    #[serde(rename = "Weak")]
    pub weak: i64,
    #[serde(rename = "Average")]
    pub average: i64,
}

impl StrengthDistribution {
    fn record(&mut self, strength: Strength, count: i64) {
        match strength {
            Strength::Strong => self.strong = count,
            Strength::Weak => self.weak = count,
            Strength::Average => self.average = count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RankedHero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub power_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RankedPower {
    pub id: i64,
    pub name: String,
    pub hero_count: i64,
}

/// Snapshot of the store's totals and rankings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_heroes: i64,
    pub total_powers: i64,
    pub total_relationships: i64,
    pub strength_distribution: StrengthDistribution,
    pub most_powerful_heroes: Vec<RankedHero>,
    pub most_popular_powers: Vec<RankedPower>,
}

async fn count(conn: &mut SqliteConnection, table: &str) -> StoreResult<i64> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(conn)
        .await
        .map_err(StoreError::query)
}

impl Database {
    /// Computes every figure from a single read transaction so the totals
    /// agree with each other.
    pub async fn stats(&self) -> StoreResult<Stats> {
        let mut tx = self.begin().await?;

        let total_heroes = count(&mut tx, "heroes").await?;
        let total_powers = count(&mut tx, "powers").await?;
        let total_relationships = count(&mut tx, "hero_powers").await?;

        let by_strength: Vec<(String, i64)> =
            sqlx::query_as("SELECT strength, COUNT(*) FROM hero_powers GROUP BY strength")
                .fetch_all(&mut *tx)
                .await
                .map_err(StoreError::query)?;

        let mut strength_distribution = StrengthDistribution::default();
        for (strength, n) in by_strength {
            let strength = strength.parse().map_err(|e| StoreError::Corrupt {
                table: "hero_powers",
                message: format!("{}", e),
            })?;
            strength_distribution.record(strength, n);
        }

        let most_powerful_heroes = sqlx::query_as::<_, RankedHero>(
            "SELECT h.id, h.name, h.super_name, COUNT(hp.id) AS power_count
             FROM heroes h
             JOIN hero_powers hp ON hp.hero_id = h.id
             GROUP BY h.id
             ORDER BY power_count DESC, h.id ASC
             LIMIT ?",
        )
        .bind(TOP_N)
        .fetch_all(&mut *tx)
        .await
        .map_err(StoreError::query)?;

        let most_popular_powers = sqlx::query_as::<_, RankedPower>(
            "SELECT p.id, p.name, COUNT(hp.id) AS hero_count
             FROM powers p
             JOIN hero_powers hp ON hp.power_id = p.id
             GROUP BY p.id
             ORDER BY hero_count DESC, p.id ASC
             LIMIT ?",
        )
        .bind(TOP_N)
        .fetch_all(&mut *tx)
        .await
        .map_err(StoreError::query)?;

        tx.commit().await.map_err(StoreError::transaction)?;

        Ok(Stats {
            total_heroes,
            total_powers,
            total_relationships,
            strength_distribution,
            most_powerful_heroes,
            most_popular_powers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_serializes_with_level_names() {
        let mut dist = StrengthDistribution::default();
        dist.record(Strength::Weak, 2);
        let json = serde_json::to_value(&dist).unwrap();
        assert_eq!(json, serde_json::json!({"Strong": 0, "Weak": 2, "Average": 0}));
    }

    #[tokio::test]
    async fn test_empty_store_stats() {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_heroes, 0);
        assert_eq!(stats.total_relationships, 0);
        assert_eq!(stats.strength_distribution, StrengthDistribution::default());
        assert!(stats.most_powerful_heroes.is_empty());
        assert!(stats.most_popular_powers.is_empty());
    }
}
