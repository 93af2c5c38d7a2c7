//! Directory catalog: listing with filters and the starter seed.

mod starters;

use anyhow::Context;
use sqlx::SqlitePool;

use listlaunch_db::models::Directory;
use listlaunch_db::pool::begin_immediate;
use listlaunch_db::queries::directories::{self as directory_queries, NewDirectory};

use crate::error::Result;

pub use starters::{STARTER_DIRECTORIES, StarterDirectory};

/// In-memory filter over the catalog. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryFilter {
    /// Exact niche tag that must appear in the directory's niches.
    pub niche: Option<String>,
    /// Inclusive lower bound on domain rating.
    pub min_dr: Option<f64>,
    /// Inclusive upper bound on domain rating. Zero means no bound.
    pub max_dr: Option<f64>,
    pub premium_only: bool,
}

impl DirectoryFilter {
    pub fn matches(&self, directory: &Directory) -> bool {
        if let Some(niche) = &self.niche {
            if !directory.niches.iter().any(|n| n == niche) {
                return false;
            }
        }
        if self.min_dr.is_some_and(|min| directory.domain_rating < min) {
            return false;
        }
        let max_dr = self.max_dr.filter(|max| *max != 0.0);
        if max_dr.is_some_and(|max| directory.domain_rating > max) {
            return false;
        }
        !self.premium_only || directory.is_premium
    }
}

/// Result of [`seed_directories`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SeedOutcome {
    pub inserted: usize,
}

/// List the catalog in insertion order, keeping entries that match `filter`.
pub async fn list_directories(pool: &SqlitePool, filter: &DirectoryFilter) -> Result<Vec<Directory>> {
    let all = directory_queries::list_directories(pool).await?;
    Ok(all.into_iter().filter(|d| filter.matches(d)).collect())
}

/// Insert the starter directories when the catalog is empty.
///
/// The emptiness check and every insert share one transaction, so a second
/// call (or a concurrent one) inserts nothing.
pub async fn seed_directories(pool: &SqlitePool) -> Result<SeedOutcome> {
    let mut tx = begin_immediate(pool).await?;

    let existing = directory_queries::count_directories(&mut *tx).await?;
    if existing > 0 {
        tracing::debug!(existing, "catalog already seeded");
        return Ok(SeedOutcome { inserted: 0 });
    }

    for starter in STARTER_DIRECTORIES {
        let niches: Vec<String> = starter.niches.iter().map(|n| (*n).to_owned()).collect();
        directory_queries::insert_directory(
            &mut *tx,
            &NewDirectory {
                name: starter.name,
                url: starter.url,
                domain_rating: starter.domain_rating,
                monthly_traffic: starter.monthly_traffic,
                niches: &niches,
                is_premium: starter.is_premium,
                notes: starter.notes,
            },
        )
        .await?;
    }

    tx.commit().await.context("failed to commit catalog seed")?;

    let inserted = STARTER_DIRECTORIES.len();
    tracing::info!(inserted, "seeded directory catalog");
    Ok(SeedOutcome { inserted })
}
