//! Plan generation and plan listing.

use std::collections::HashMap;

use anyhow::Context;
use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_db::models::{PlanEntry, PlanEntryWithDirectory};
use listlaunch_db::pool::begin_immediate;
use listlaunch_db::queries::directories as directory_queries;
use listlaunch_db::queries::plans::{self as plan_queries, NewPlanEntry};
use listlaunch_db::queries::sites as site_queries;

use super::score::{priority_for_rank, rank_directories};
use crate::error::{PlannerError, Result};

/// Number of directories a plan targets when the caller does not say.
pub const DEFAULT_DESIRED_COUNT: usize = 100;

/// Result of [`generate_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GeneratePlanOutcome {
    /// Entries inserted by this call. Existing entries are not counted.
    pub created: usize,
}

/// Build or extend the submission plan for a site.
///
/// Ranks the catalog for the site's goal, keeps the top `desired_count`, and
/// inserts an entry for every selected directory that is not already in the
/// plan. Existing entries are left untouched, including their priority and
/// goal snapshot. All inserts share one transaction and go through the
/// `(site_id, directory_id)` unique index, so repeated or concurrent calls
/// never create duplicates.
pub async fn generate_plan(
    pool: &SqlitePool,
    site_id: Uuid,
    desired_count: usize,
) -> Result<GeneratePlanOutcome> {
    let site = site_queries::get_site(pool, site_id)
        .await?
        .ok_or_else(|| PlannerError::not_found("site", site_id))?;

    let mut tx = begin_immediate(pool).await?;

    let catalog = directory_queries::list_directories(&mut *tx).await?;
    if catalog.is_empty() {
        return Err(PlannerError::EmptyCatalog);
    }

    let selected = rank_directories(&catalog, site.goal, desired_count);
    let mut created = 0;
    for (rank, directory) in selected.iter().enumerate() {
        let new = NewPlanEntry {
            site_id,
            directory_id: directory.id,
            priority: priority_for_rank(rank),
            goal: site.goal,
        };
        if plan_queries::insert_plan_entry_if_absent(&mut *tx, &new).await? {
            created += 1;
        }
    }

    tx.commit().await.context("failed to commit plan generation")?;

    tracing::info!(
        site_id = %site_id,
        goal = %site.goal,
        selected = selected.len(),
        created,
        "generated plan"
    );
    Ok(GeneratePlanOutcome { created })
}

/// A site's plan entries in creation order, each with its directory.
///
/// Fails with `NotFound` when the site does not exist.
pub async fn list_plan(pool: &SqlitePool, site_id: Uuid) -> Result<Vec<PlanEntryWithDirectory>> {
    if site_queries::get_site(pool, site_id).await?.is_none() {
        return Err(PlannerError::not_found("site", site_id));
    }

    let entries = plan_queries::list_plan_entries_for_site(pool, site_id).await?;
    let mut directories: HashMap<Uuid, _> = directory_queries::list_directories_for_site(pool, site_id)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    tracing::debug!(site_id = %site_id, entries = entries.len(), "listed plan");

    Ok(entries
        .into_iter()
        .map(|entry| {
            // Each directory appears at most once per site.
            let directory = directories.remove(&entry.directory_id);
            PlanEntryWithDirectory { entry, directory }
        })
        .collect())
}

/// Fetch one plan entry, failing with `NotFound` when it does not exist.
pub async fn get_plan_entry(pool: &SqlitePool, plan_id: Uuid) -> Result<PlanEntry> {
    plan_queries::get_plan_entry(pool, plan_id)
        .await?
        .ok_or_else(|| PlannerError::not_found("plan entry", plan_id))
}
