//! Database query functions for the `directories` table.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::Directory;

/// Parameters for inserting a new directory row.
#[derive(Debug, Clone)]
pub struct NewDirectory<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub domain_rating: f64,
    pub monthly_traffic: i64,
    pub niches: &'a [String],
    pub is_premium: bool,
    pub notes: Option<&'a str>,
}

/// Insert a new directory. Returns the inserted row.
///
/// Accepts any executor so the catalog seed can run inside a transaction.
pub async fn insert_directory(
    executor: impl SqliteExecutor<'_>,
    new: &NewDirectory<'_>,
) -> Result<Directory> {
    let now = Utc::now();
    let directory = sqlx::query_as::<_, Directory>(
        "INSERT INTO directories (id, name, url, domain_rating, monthly_traffic, niches, \
         is_premium, notes, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(new.name)
    .bind(new.url)
    .bind(new.domain_rating)
    .bind(new.monthly_traffic)
    .bind(Json(new.niches))
    .bind(new.is_premium)
    .bind(new.notes)
    .bind(now)
    .fetch_one(executor)
    .await
    .with_context(|| format!("failed to insert directory {:?}", new.name))?;

    Ok(directory)
}

/// Fetch a directory by its ID.
pub async fn get_directory(pool: &SqlitePool, id: Uuid) -> Result<Option<Directory>> {
    let directory = sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch directory")?;

    Ok(directory)
}

/// List the whole catalog in insertion order.
///
/// Plan generation relies on this order to break score ties.
pub async fn list_directories(executor: impl SqliteExecutor<'_>) -> Result<Vec<Directory>> {
    let directories =
        sqlx::query_as::<_, Directory>("SELECT * FROM directories ORDER BY created_at, rowid")
            .fetch_all(executor)
            .await
            .context("failed to list directories")?;

    Ok(directories)
}

/// Count catalog rows.
pub async fn count_directories(executor: impl SqliteExecutor<'_>) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM directories")
        .fetch_one(executor)
        .await
        .context("failed to count directories")?;

    Ok(row.0)
}

/// List every directory referenced by a site's plan entries.
pub async fn list_directories_for_site(pool: &SqlitePool, site_id: Uuid) -> Result<Vec<Directory>> {
    let directories = sqlx::query_as::<_, Directory>(
        "SELECT d.* FROM directories d \
         WHERE d.id IN (SELECT p.directory_id FROM directory_plans p WHERE p.site_id = $1)",
    )
    .bind(site_id)
    .fetch_all(pool)
    .await
    .context("failed to list directories for site")?;

    Ok(directories)
}
