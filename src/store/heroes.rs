//! Hero reads and writes

use sqlx::{Executor, Sqlite};
use tracing::{debug, info};

use crate::model::{Hero, HeroPowerRecord};
use crate::validation::{FieldError, HeroPatch, NewHero, ValidationErrors};

use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::query::{into_records, HeroPowerQuery, HeroPowerRow};
use super::NamePolicy;

pub(crate) async fn fetch_hero<'e, E>(executor: E, id: i64) -> StoreResult<Option<Hero>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(StoreError::query)
}

impl Database {
    /// All heroes, ascending id
    pub async fn list_heroes(&self) -> StoreResult<Vec<Hero>> {
        sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::query)
    }

    pub async fn find_hero(&self, id: i64) -> StoreResult<Option<Hero>> {
        fetch_hero(self.pool(), id).await
    }

    /// A hero together with every link it owns, read from one snapshot.
    pub async fn hero_with_links(&self, id: i64) -> StoreResult<Option<(Hero, Vec<HeroPowerRecord>)>> {
        let mut tx = self.begin().await?;
        let Some(hero) = fetch_hero(&mut *tx, id).await? else {
            return Ok(None);
        };

        let rows = HeroPowerQuery::for_hero(id)
            .build()
            .build_query_as::<HeroPowerRow>()
            .fetch_all(&mut *tx)
            .await
            .map_err(StoreError::query)?;
        tx.commit().await.map_err(StoreError::transaction)?;

        Ok(Some((hero, into_records(rows)?)))
    }

    pub async fn create_hero(&self, new: &NewHero, policy: NamePolicy) -> StoreResult<Hero> {
        let mut tx = self.begin_write().await?;

        if policy == NamePolicy::RejectDuplicates {
            let taken: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM heroes WHERE name = ? OR super_name = ?",
            )
            .bind(&new.name)
            .bind(&new.super_name)
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::query)?;

            if taken > 0 {
                return Err(ValidationErrors::from(FieldError::new(
                    "name",
                    "Hero with this name or super name already exists",
                ))
                .into());
            }
        }

        let id = sqlx::query("INSERT INTO heroes (name, super_name) VALUES (?, ?)")
            .bind(&new.name)
            .bind(&new.super_name)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?
            .last_insert_rowid();

        tx.commit().await.map_err(StoreError::transaction)?;

        info!(hero_id = id, "hero created");
        Ok(Hero {
            id,
            name: new.name.clone(),
            super_name: new.super_name.clone(),
        })
    }

    /// Applies the supplied fields. `None` when the hero does not exist.
    pub async fn update_hero(&self, id: i64, patch: &HeroPatch) -> StoreResult<Option<Hero>> {
        let mut tx = self.begin_write().await?;
        let Some(existing) = fetch_hero(&mut *tx, id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        sqlx::query(
            "UPDATE heroes SET name = COALESCE(?, name), super_name = COALESCE(?, super_name) \
             WHERE id = ?",
        )
        .bind(patch.name.as_deref())
        .bind(patch.super_name.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::query)?;

        let updated = fetch_hero(&mut *tx, id).await?;
        tx.commit().await.map_err(StoreError::transaction)?;

        info!(hero_id = id, "hero updated");
        Ok(updated)
    }

    /// Deletes the hero and every link that references it in one
    /// transaction. Returns the deleted hero.
    pub async fn delete_hero(&self, id: i64) -> StoreResult<Option<Hero>> {
        let mut tx = self.begin_write().await?;
        let Some(hero) = fetch_hero(&mut *tx, id).await? else {
            return Ok(None);
        };

        let links = sqlx::query("DELETE FROM hero_powers WHERE hero_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?
            .rows_affected();

        sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?;

        tx.commit().await.map_err(StoreError::transaction)?;

        debug!(hero_id = id, links, "cascaded hero links");
        info!(hero_id = id, "hero deleted");
        Ok(Some(hero))
    }
}
