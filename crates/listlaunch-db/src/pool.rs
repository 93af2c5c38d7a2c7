use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::config::DbConfig;

/// Migrations embedded at compile time from `crates/listlaunch-db/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a connection pool with sensible defaults.
///
/// Foreign keys are enforced on every connection. The database file is
/// created when missing.
pub async fn create_pool(config: &DbConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid database URL {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    // Every connection to an in-memory database sees its own empty database,
    // so those pools are pinned to a single connection.
    let max_connections = if config.is_in_memory() { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database at {}", config.database_url))?;
    Ok(pool)
}

/// Begin a transaction that takes the write lock up front.
///
/// A deferred transaction that reads before it writes fails with
/// `SQLITE_BUSY` when another writer commits in between. `BEGIN IMMEDIATE`
/// waits on the busy timeout instead, so read-then-write callers serialize.
pub async fn begin_immediate(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>> {
    pool.begin_with("BEGIN IMMEDIATE")
        .await
        .context("failed to begin immediate transaction")
}

/// Run all pending embedded migrations against the pool.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    info!("migrations applied successfully");
    Ok(())
}

/// Ensure the target database exists, creating the file if necessary.
///
/// In-memory databases always exist and are left alone.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<()> {
    if config.is_in_memory() {
        return Ok(());
    }

    let exists = Sqlite::database_exists(&config.database_url)
        .await
        .with_context(|| format!("failed to check database {}", config.database_url))?;

    if exists {
        info!(db = %config.database_url, "database already exists");
    } else {
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("failed to create database {}", config.database_url))?;
        info!(db = %config.database_url, "database created");
    }

    Ok(())
}

/// Return the row count for every application table.
///
/// Useful for the `listlaunch db-init` success message.
pub async fn table_counts(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' \
           AND name NOT LIKE 'sqlite_%' \
           AND name != '_sqlx_migrations' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("failed to list tables")?;

    let mut counts = Vec::with_capacity(tables.len());
    for (table_name,) in &tables {
        // Table names come from sqlite_master so they are safe identifiers.
        let query = format!("SELECT COUNT(*) FROM {table_name}");
        let count: (i64,) = sqlx::query_as(&query)
            .fetch_one(pool)
            .await
            .with_context(|| format!("failed to count rows in {table_name}"))?;
        counts.push((table_name.clone(), count.0));
    }
    Ok(counts)
}
