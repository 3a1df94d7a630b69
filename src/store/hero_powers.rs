//! Hero-power link reads and writes
//!
//! A link is only ever created when both endpoints resolve inside the same
//! transaction that inserts it.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::info;

use crate::model::HeroPowerRecord;
use crate::validation::{rules, HeroPowerPatch, NewHeroPower, ValidationErrors};

use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::heroes::fetch_hero;
use super::powers::fetch_power;
use super::query::{into_records, HeroPowerQuery, HeroPowerRow, RECORD_SELECT};

async fn fetch_record(conn: &mut SqliteConnection, id: i64) -> StoreResult<Option<HeroPowerRecord>> {
    let mut builder = QueryBuilder::<Sqlite>::new(RECORD_SELECT);
    builder.push(" WHERE hp.id = ").push_bind(id);

    let row = builder
        .build_query_as::<HeroPowerRow>()
        .fetch_optional(conn)
        .await
        .map_err(StoreError::query)?;

    row.map(HeroPowerRecord::try_from).transpose()
}

impl Database {
    /// Runs a composed listing query
    pub async fn query_hero_powers(&self, query: &HeroPowerQuery) -> StoreResult<Vec<HeroPowerRecord>> {
        let rows = query
            .build()
            .build_query_as::<HeroPowerRow>()
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::query)?;

        into_records(rows)
    }

    pub async fn find_hero_power(&self, id: i64) -> StoreResult<Option<HeroPowerRecord>> {
        let mut conn = self.pool().acquire().await.map_err(StoreError::connection)?;
        fetch_record(&mut conn, id).await
    }

    /// Links a hero to a power.
    ///
    /// Fails with `StoreError::Validation` naming each id that does not
    /// resolve; nothing is written in that case.
    pub async fn create_hero_power(&self, new: &NewHeroPower) -> StoreResult<HeroPowerRecord> {
        let mut tx = self.begin_write().await?;

        let hero_exists = fetch_hero(&mut *tx, new.hero_id).await?.is_some();
        let power_exists = fetch_power(&mut *tx, new.power_id).await?.is_some();

        let mut errors = ValidationErrors::new();
        errors.collect(rules::reference("hero_id", new.hero_id, "hero", hero_exists));
        errors.collect(rules::reference("power_id", new.power_id, "power", power_exists));
        errors.into_result()?;

        let id = sqlx::query("INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?)")
            .bind(new.strength.as_str())
            .bind(new.hero_id)
            .bind(new.power_id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?
            .last_insert_rowid();

        let record = fetch_record(&mut tx, id).await?.ok_or_else(|| StoreError::Query {
            message: format!("hero power {} vanished after insert", id),
        })?;
        tx.commit().await.map_err(StoreError::transaction)?;

        info!(hero_power_id = id, hero_id = new.hero_id, power_id = new.power_id, "hero power created");
        Ok(record)
    }

    /// Changes the strength of a link. `None` when the link does not exist.
    pub async fn update_hero_power(
        &self,
        id: i64,
        patch: &HeroPowerPatch,
    ) -> StoreResult<Option<HeroPowerRecord>> {
        let mut tx = self.begin_write().await?;
        let Some(existing) = fetch_record(&mut tx, id).await? else {
            return Ok(None);
        };
        let Some(strength) = patch.strength else {
            return Ok(Some(existing));
        };

        sqlx::query("UPDATE hero_powers SET strength = ? WHERE id = ?")
            .bind(strength.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?;

        let updated = fetch_record(&mut tx, id).await?;
        tx.commit().await.map_err(StoreError::transaction)?;

        info!(hero_power_id = id, strength = %strength, "hero power updated");
        Ok(updated)
    }

    /// Deletes one link; its hero and power are untouched.
    pub async fn delete_hero_power(&self, id: i64) -> StoreResult<Option<HeroPowerRecord>> {
        let mut tx = self.begin_write().await?;
        let Some(record) = fetch_record(&mut tx, id).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM hero_powers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?;

        tx.commit().await.map_err(StoreError::transaction)?;

        info!(hero_power_id = id, "hero power deleted");
        Ok(Some(record))
    }
}
