//! Pack read, save, and generation.

use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_db::models::SubmissionPack;
use listlaunch_db::queries::directories as directory_queries;
use listlaunch_db::queries::packs as pack_queries;
use listlaunch_db::queries::sites as site_queries;

use super::extract::extract_json;
use super::prompt::build_request;
use super::schema::PackDraft;
use crate::error::{PlannerError, Result};
use crate::generator::TextGenerator;
use crate::plan::get_plan_entry;

/// The pack saved for a plan entry, if any.
pub async fn get_pack(pool: &SqlitePool, plan_id: Uuid) -> Result<Option<SubmissionPack>> {
    Ok(pack_queries::get_pack_for_plan(pool, plan_id).await?)
}

/// Save `draft` as the pack for a plan entry, replacing any existing pack
/// wholesale.
pub async fn save_pack(pool: &SqlitePool, plan_id: Uuid, draft: PackDraft) -> Result<SubmissionPack> {
    get_plan_entry(pool, plan_id).await?;

    let pack = pack_queries::upsert_pack(pool, plan_id, &draft.into_fields()).await?;
    tracing::info!(plan_id = %plan_id, pack_id = %pack.id, "saved submission pack");
    Ok(pack)
}

/// Return the pack for a plan entry, generating it when needed.
///
/// An existing pack is returned unchanged unless `force` is set, and the
/// generator is not called. Otherwise the generator is called exactly once
/// and its output is extracted, validated, and saved. A missing generator
/// fails with `Configuration` before anything is written.
pub async fn generate_pack(
    pool: &SqlitePool,
    generator: Option<&dyn TextGenerator>,
    plan_id: Uuid,
    force: bool,
) -> Result<SubmissionPack> {
    if !force {
        if let Some(existing) = pack_queries::get_pack_for_plan(pool, plan_id).await? {
            tracing::debug!(plan_id = %plan_id, "submission pack already exists");
            return Ok(existing);
        }
    }

    let entry = get_plan_entry(pool, plan_id).await?;
    let directory = directory_queries::get_directory(pool, entry.directory_id)
        .await?
        .ok_or_else(|| PlannerError::not_found("directory", entry.directory_id))?;
    let site = site_queries::get_site(pool, entry.site_id)
        .await?
        .ok_or_else(|| PlannerError::not_found("site", entry.site_id))?;

    let generator = generator.ok_or_else(|| {
        PlannerError::Configuration(
            "no text generator configured; set OPENAI_API_KEY or [generator] api_key".to_string(),
        )
    })?;

    let request = build_request(&site, &entry, &directory);
    tracing::info!(
        plan_id = %plan_id,
        provider = generator.name(),
        directory = %directory.name,
        force,
        "generating submission pack"
    );

    let output = generator.generate(&request).await?;
    let draft = PackDraft::from_value(extract_json(&output)?)?;

    save_pack(pool, plan_id, draft).await
}
