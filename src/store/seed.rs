//! Demo data loader

use sqlx::SqliteConnection;
use tracing::info;

use crate::model::Strength;

use super::database::Database;
use super::errors::{StoreError, StoreResult};

const HEROES: [(&str, &str); 10] = [
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: [(&str, &str); 4] = [
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

/// (strength, hero index, power index) into the tables above
const LINKS: [(Strength, usize, usize); 3] = [
    (Strength::Strong, 0, 1),
    (Strength::Average, 1, 0),
    (Strength::Weak, 2, 2),
];

/// Counts of rows written by [`Database::seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

async fn insert(conn: &mut SqliteConnection, sql: &str, a: &str, b: &str) -> StoreResult<i64> {
    Ok(sqlx::query(sql)
        .bind(a)
        .bind(b)
        .execute(conn)
        .await
        .map_err(StoreError::query)?
        .last_insert_rowid())
}

impl Database {
    /// Replaces every row with the demo data set, atomically.
    pub async fn seed(&self) -> StoreResult<SeedSummary> {
        let mut tx = self.begin_write().await?;

        for table in ["hero_powers", "heroes", "powers"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await
                .map_err(StoreError::query)?;
        }

        let mut hero_ids = Vec::with_capacity(HEROES.len());
        for (name, super_name) in HEROES {
            let id = insert(&mut tx, "INSERT INTO heroes (name, super_name) VALUES (?, ?)", name, super_name).await?;
            hero_ids.push(id);
        }

        let mut power_ids = Vec::with_capacity(POWERS.len());
        for (name, description) in POWERS {
            let id = insert(&mut tx, "INSERT INTO powers (name, description) VALUES (?, ?)", name, description).await?;
            power_ids.push(id);
        }

        for (strength, hero, power) in LINKS {
            sqlx::query("INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?)")
                .bind(strength.as_str())
                .bind(hero_ids[hero])
                .bind(power_ids[power])
                .execute(&mut *tx)
                .await
                .map_err(StoreError::query)?;
        }

        tx.commit().await.map_err(StoreError::transaction)?;

        let summary = SeedSummary {
            heroes: HEROES.len(),
            powers: POWERS.len(),
            hero_powers: LINKS.len(),
        };
        info!(?summary, "seeded demo data");
        Ok(summary)
    }
}
