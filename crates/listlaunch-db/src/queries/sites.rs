//! Database query functions for the `sites` table.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Site, SiteGoal};

/// Insert a new site. `domain` must already be normalized.
///
/// A second site with the same domain is rejected by the unique index.
pub async fn insert_site(
    pool: &SqlitePool,
    domain: &str,
    name: Option<&str>,
    goal: SiteGoal,
    notes: Option<&str>,
) -> Result<Site> {
    let now = Utc::now();
    let site = sqlx::query_as::<_, Site>(
        "INSERT INTO sites (id, domain, name, goal, notes, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $6) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(domain)
    .bind(name)
    .bind(goal)
    .bind(notes)
    .bind(now)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert site {domain:?}"))?;

    Ok(site)
}

/// Fetch a site by its ID.
pub async fn get_site(pool: &SqlitePool, id: Uuid) -> Result<Option<Site>> {
    let site = sqlx::query_as::<_, Site>("SELECT * FROM sites WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch site")?;

    Ok(site)
}

/// Fetch a site by its normalized domain.
pub async fn get_site_by_domain(pool: &SqlitePool, domain: &str) -> Result<Option<Site>> {
    let site = sqlx::query_as::<_, Site>("SELECT * FROM sites WHERE domain = $1")
        .bind(domain)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch site by domain {domain:?}"))?;

    Ok(site)
}

/// List all sites, oldest first.
pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<Site>> {
    let sites = sqlx::query_as::<_, Site>("SELECT * FROM sites ORDER BY created_at, rowid")
        .fetch_all(pool)
        .await
        .context("failed to list sites")?;

    Ok(sites)
}

/// Overwrite every editable column of a site. Returns the updated row, or
/// `None` when no site has this ID.
pub async fn update_site(
    pool: &SqlitePool,
    id: Uuid,
    domain: &str,
    name: Option<&str>,
    goal: SiteGoal,
    notes: Option<&str>,
) -> Result<Option<Site>> {
    let site = sqlx::query_as::<_, Site>(
        "UPDATE sites \
         SET domain = $1, name = $2, goal = $3, notes = $4, updated_at = $5 \
         WHERE id = $6 \
         RETURNING *",
    )
    .bind(domain)
    .bind(name)
    .bind(goal)
    .bind(notes)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to update site {id}"))?;

    Ok(site)
}
