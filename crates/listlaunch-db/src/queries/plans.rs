//! Database query functions for the `directory_plans` table.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::{PlanEntry, PlanStatus, SiteGoal};

/// Parameters for inserting a new plan entry.
#[derive(Debug, Clone, Copy)]
pub struct NewPlanEntry {
    pub site_id: Uuid,
    pub directory_id: Uuid,
    pub priority: i64,
    pub goal: SiteGoal,
}

/// Insert a plan entry unless one already exists for the same
/// (site, directory) pair.
///
/// Uses `ON CONFLICT DO NOTHING` against the unique index, so concurrent
/// callers cannot create duplicates. Returns `true` when a row was inserted.
pub async fn insert_plan_entry_if_absent(
    executor: impl SqliteExecutor<'_>,
    new: &NewPlanEntry,
) -> Result<bool> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO directory_plans (id, site_id, directory_id, priority, goal, status, \
         created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, 'planned', $6, $6) \
         ON CONFLICT (site_id, directory_id) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(new.site_id)
    .bind(new.directory_id)
    .bind(new.priority)
    .bind(new.goal)
    .bind(now)
    .execute(executor)
    .await
    .with_context(|| {
        format!(
            "failed to insert plan entry for site {} / directory {}",
            new.site_id, new.directory_id
        )
    })?;

    Ok(result.rows_affected() == 1)
}

/// Fetch a plan entry by its ID.
pub async fn get_plan_entry(pool: &SqlitePool, id: Uuid) -> Result<Option<PlanEntry>> {
    let entry = sqlx::query_as::<_, PlanEntry>("SELECT * FROM directory_plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plan entry")?;

    Ok(entry)
}

/// List a site's plan entries in creation order (which is rank order for
/// entries created by the same generation run).
pub async fn list_plan_entries_for_site(pool: &SqlitePool, site_id: Uuid) -> Result<Vec<PlanEntry>> {
    let entries = sqlx::query_as::<_, PlanEntry>(
        "SELECT * FROM directory_plans WHERE site_id = $1 ORDER BY created_at, rowid",
    )
    .bind(site_id)
    .fetch_all(pool)
    .await
    .context("failed to list plan entries for site")?;

    Ok(entries)
}

/// Count a site's plan entries.
pub async fn count_plan_entries_for_site(pool: &SqlitePool, site_id: Uuid) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM directory_plans WHERE site_id = $1")
        .bind(site_id)
        .fetch_one(pool)
        .await
        .context("failed to count plan entries")?;

    Ok(row.0)
}

/// Set the status and notes of a plan entry.
///
/// `status_updated_at` and `updated_at` are always set to `now`.
/// `submitted_at` / `live_at` are only overwritten when `Some`. Returns the
/// number of rows affected (0 means the entry does not exist).
pub async fn update_plan_status(
    pool: &SqlitePool,
    id: Uuid,
    status: PlanStatus,
    notes: Option<&str>,
    now: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    live_at: Option<DateTime<Utc>>,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE directory_plans \
         SET status = $1, \
             notes = $2, \
             status_updated_at = $3, \
             updated_at = $3, \
             submitted_at = COALESCE($4, submitted_at), \
             live_at = COALESCE($5, live_at) \
         WHERE id = $6",
    )
    .bind(status)
    .bind(notes)
    .bind(now)
    .bind(submitted_at)
    .bind(live_at)
    .bind(id)
    .execute(pool)
    .await
    .with_context(|| format!("failed to update status of plan entry {id}"))?;

    Ok(result.rows_affected())
}

/// Replace the notes of a plan entry. Returns the number of rows affected.
pub async fn update_plan_notes(pool: &SqlitePool, id: Uuid, notes: Option<&str>) -> Result<u64> {
    let result = sqlx::query("UPDATE directory_plans SET notes = $1, updated_at = $2 WHERE id = $3")
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("failed to update notes of plan entry {id}"))?;

    Ok(result.rows_affected())
}
