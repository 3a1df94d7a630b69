//! # Database Facade
//!
//! Owns the connection pool. Constructed once by the process and cloned
//! into the HTTP state; there is no global handle.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info, instrument};

use super::errors::{StoreError, StoreResult};

/// How long a statement waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema statements, applied in order and safe to re-run.
///
/// `AUTOINCREMENT` keeps ids from ever being reused. The CHECK and foreign
/// key clauses back up the validation engine.
const SCHEMA: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS heroes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        super_name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS powers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL CHECK (length(trim(description)) >= 20)
    )",
    "CREATE TABLE IF NOT EXISTS hero_powers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        strength TEXT NOT NULL CHECK (strength IN ('Strong', 'Weak', 'Average')),
        hero_id INTEGER NOT NULL REFERENCES heroes (id) ON DELETE CASCADE,
        power_id INTEGER NOT NULL REFERENCES powers (id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_hero_powers_hero_id ON hero_powers (hero_id)",
    "CREATE INDEX IF NOT EXISTS idx_hero_powers_power_id ON hero_powers (power_id)",
];

/// Handle to the relational store
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database at `url`.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(StoreError::connection)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StoreError::connection)?;

        info!(max_connections, "database opened");
        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// An in-memory SQLite database lives and dies with its connection, so
    /// the pool holds exactly one that never expires.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StoreError::connection)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StoreError::connection)?;

        Ok(Self { pool })
    }

    /// Creates the tables and indexes if they do not exist.
    pub async fn init_schema(&self) -> StoreResult<()> {
        let mut tx = self.begin_write().await?;
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::query)?;
        }
        tx.commit().await.map_err(StoreError::transaction)?;

        debug!("schema ready");
        Ok(())
    }

    /// Starts a read transaction. Dropping it without commit rolls back.
    pub async fn begin(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(StoreError::transaction)
    }

    /// Starts a transaction that holds the write lock from its first
    /// statement.
    ///
    /// A deferred transaction that reads and then writes cannot upgrade its
    /// lock while another connection is writing, and SQLite fails it with
    /// `SQLITE_BUSY` without waiting. `BEGIN IMMEDIATE` takes the lock up
    /// front, so concurrent writers queue on the busy timeout instead.
    pub async fn begin_write(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(StoreError::transaction)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trips a trivial statement
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::query)?;
        Ok(())
    }

    /// Waits for checked-out connections and closes the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
