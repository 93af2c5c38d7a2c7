//! Database query functions for the `submission_packs` table.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::SubmissionPack;

/// Editable content of a submission pack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackFields {
    pub title: String,
    pub tagline: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub utm_url: Option<String>,
    pub cta: Option<String>,
    pub extra_fields: BTreeMap<String, String>,
}

/// Fetch the pack attached to a plan entry, if any.
pub async fn get_pack_for_plan(pool: &SqlitePool, plan_id: Uuid) -> Result<Option<SubmissionPack>> {
    let pack = sqlx::query_as::<_, SubmissionPack>(
        "SELECT * FROM submission_packs WHERE plan_id = $1",
    )
    .bind(plan_id)
    .fetch_optional(pool)
    .await
    .context("failed to fetch submission pack")?;

    Ok(pack)
}

/// Insert the pack for a plan entry, or replace every content column of the
/// existing one.
///
/// A single `INSERT ... ON CONFLICT DO UPDATE` against the unique index on
/// `plan_id`, so at most one pack exists per plan entry. The row keeps its
/// original `id` and `created_at` on replace.
pub async fn upsert_pack(
    pool: &SqlitePool,
    plan_id: Uuid,
    fields: &PackFields,
) -> Result<SubmissionPack> {
    let now = Utc::now();
    let pack = sqlx::query_as::<_, SubmissionPack>(
        "INSERT INTO submission_packs (id, plan_id, title, tagline, short_description, \
         long_description, categories, tags, utm_url, cta, extra_fields, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) \
         ON CONFLICT (plan_id) DO UPDATE SET \
             title = excluded.title, \
             tagline = excluded.tagline, \
             short_description = excluded.short_description, \
             long_description = excluded.long_description, \
             categories = excluded.categories, \
             tags = excluded.tags, \
             utm_url = excluded.utm_url, \
             cta = excluded.cta, \
             extra_fields = excluded.extra_fields, \
             updated_at = excluded.updated_at \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(plan_id)
    .bind(&fields.title)
    .bind(&fields.tagline)
    .bind(&fields.short_description)
    .bind(&fields.long_description)
    .bind(Json(&fields.categories))
    .bind(Json(&fields.tags))
    .bind(&fields.utm_url)
    .bind(&fields.cta)
    .bind(Json(&fields.extra_fields))
    .bind(now)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to save submission pack for plan entry {plan_id}"))?;

    Ok(pack)
}
