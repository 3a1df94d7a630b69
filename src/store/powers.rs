//! Power reads and writes

use sqlx::{Executor, Sqlite};
use tracing::{debug, info};

use crate::model::{HeroPowerRecord, Power};
use crate::validation::{FieldError, NewPower, PowerPatch, ValidationErrors};

use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::query::{into_records, HeroPowerQuery, HeroPowerRow};
use super::NamePolicy;

pub(crate) async fn fetch_power<'e, E>(executor: E, id: i64) -> StoreResult<Option<Power>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(StoreError::query)
}

impl Database {
    /// All powers, ascending id
    pub async fn list_powers(&self) -> StoreResult<Vec<Power>> {
        sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::query)
    }

    pub async fn find_power(&self, id: i64) -> StoreResult<Option<Power>> {
        fetch_power(self.pool(), id).await
    }

    /// A power together with every link that references it
    pub async fn power_with_links(&self, id: i64) -> StoreResult<Option<(Power, Vec<HeroPowerRecord>)>> {
        let mut tx = self.begin().await?;
        let Some(power) = fetch_power(&mut *tx, id).await? else {
            return Ok(None);
        };

        let rows = HeroPowerQuery::for_power(id)
            .build()
            .build_query_as::<HeroPowerRow>()
            .fetch_all(&mut *tx)
            .await
            .map_err(StoreError::query)?;
        tx.commit().await.map_err(StoreError::transaction)?;

        Ok(Some((power, into_records(rows)?)))
    }

    pub async fn create_power(&self, new: &NewPower, policy: NamePolicy) -> StoreResult<Power> {
        let mut tx = self.begin_write().await?;

        if policy == NamePolicy::RejectDuplicates {
            let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM powers WHERE name = ?")
                .bind(&new.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(StoreError::query)?;

            if taken > 0 {
                return Err(ValidationErrors::from(FieldError::new(
                    "name",
                    "Power with this name already exists",
                ))
                .into());
            }
        }

        let id = sqlx::query("INSERT INTO powers (name, description) VALUES (?, ?)")
            .bind(&new.name)
            .bind(&new.description)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?
            .last_insert_rowid();

        tx.commit().await.map_err(StoreError::transaction)?;

        info!(power_id = id, "power created");
        Ok(Power {
            id,
            name: new.name.clone(),
            description: new.description.clone(),
        })
    }

    pub async fn update_power(&self, id: i64, patch: &PowerPatch) -> StoreResult<Option<Power>> {
        let mut tx = self.begin_write().await?;
        let Some(existing) = fetch_power(&mut *tx, id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        sqlx::query(
            "UPDATE powers SET name = COALESCE(?, name), description = COALESCE(?, description) \
             WHERE id = ?",
        )
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::query)?;

        let updated = fetch_power(&mut *tx, id).await?;
        tx.commit().await.map_err(StoreError::transaction)?;

        info!(power_id = id, "power updated");
        Ok(updated)
    }

    /// Deletes the power and every link that references it
    pub async fn delete_power(&self, id: i64) -> StoreResult<Option<Power>> {
        let mut tx = self.begin_write().await?;
        let Some(power) = fetch_power(&mut *tx, id).await? else {
            return Ok(None);
        };

        let links = sqlx::query("DELETE FROM hero_powers WHERE power_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?
            .rows_affected();

        sqlx::query("DELETE FROM powers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query)?;

        tx.commit().await.map_err(StoreError::transaction)?;

        debug!(power_id = id, links, "cascaded power links");
        info!(power_id = id, "power deleted");
        Ok(Some(power))
    }
}
