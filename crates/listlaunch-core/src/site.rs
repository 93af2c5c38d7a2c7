//! Site profiles: the sites being promoted.

use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_db::models::{Site, SiteGoal};
use listlaunch_db::queries::sites as site_queries;

use crate::error::{PlannerError, Result};

/// Input to [`upsert_site`].
#[derive(Debug, Clone, Default)]
pub struct SiteInput {
    /// Target an existing site by ID instead of by domain.
    pub id: Option<Uuid>,
    pub domain: String,
    pub name: Option<String>,
    pub goal: Option<SiteGoal>,
    pub notes: Option<String>,
}

/// Trim and lowercase a domain. Returns `None` when nothing is left.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().to_lowercase();
    if domain.is_empty() { None } else { Some(domain) }
}

/// Create or update a site profile.
///
/// With an ID the site is overwritten: domain, name and notes are replaced
/// (absent values clear them) and an absent goal keeps the stored one.
/// Without an ID the normalized domain is the key: an existing site is
/// patched, keeping stored values for absent fields, otherwise a new site is
/// inserted with the goal defaulting to DR.
pub async fn upsert_site(pool: &SqlitePool, input: SiteInput) -> Result<Site> {
    let domain = normalize_domain(&input.domain)
        .ok_or_else(|| PlannerError::InvalidInput("domain must not be empty".to_string()))?;

    if let Some(id) = input.id {
        let existing = site_queries::get_site(pool, id)
            .await?
            .ok_or_else(|| PlannerError::not_found("site", id))?;
        let goal = input.goal.unwrap_or(existing.goal);

        let site = site_queries::update_site(
            pool,
            id,
            &domain,
            input.name.as_deref(),
            goal,
            input.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| PlannerError::not_found("site", id))?;

        tracing::info!(site_id = %site.id, domain = %site.domain, "updated site");
        return Ok(site);
    }

    if let Some(existing) = site_queries::get_site_by_domain(pool, &domain).await? {
        return patch_existing(pool, existing, &input).await;
    }

    match site_queries::insert_site(
        pool,
        &domain,
        input.name.as_deref(),
        input.goal.unwrap_or_default(),
        input.notes.as_deref(),
    )
    .await
    .map_err(PlannerError::from)
    {
        Ok(site) => {
            tracing::info!(site_id = %site.id, domain = %site.domain, "created site");
            Ok(site)
        }
        // Lost an insert race for this domain: patch the winner instead.
        Err(PlannerError::DuplicateKey(_)) => {
            let existing = site_queries::get_site_by_domain(pool, &domain)
                .await?
                .ok_or_else(|| PlannerError::not_found("site", &domain))?;
            patch_existing(pool, existing, &input).await
        }
        Err(err) => Err(err),
    }
}

async fn patch_existing(pool: &SqlitePool, existing: Site, input: &SiteInput) -> Result<Site> {
    let name = input.name.as_deref().or(existing.name.as_deref());
    let notes = input.notes.as_deref().or(existing.notes.as_deref());
    let goal = input.goal.unwrap_or(existing.goal);

    let site = site_queries::update_site(pool, existing.id, &existing.domain, name, goal, notes)
        .await?
        .ok_or_else(|| PlannerError::not_found("site", existing.id))?;

    tracing::info!(site_id = %site.id, domain = %site.domain, "updated site");
    Ok(site)
}

/// All sites, oldest first.
pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<Site>> {
    Ok(site_queries::list_sites(pool).await?)
}

/// Fetch a site, failing with `NotFound` when it does not exist.
pub async fn get_site(pool: &SqlitePool, id: Uuid) -> Result<Site> {
    site_queries::get_site(pool, id)
        .await?
        .ok_or_else(|| PlannerError::not_found("site", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_domain("  Example.COM \n").as_deref(), Some("example.com"));
        assert_eq!(normalize_domain("a.io").as_deref(), Some("a.io"));
    }

    #[test]
    fn normalize_rejects_blank() {
        assert_eq!(normalize_domain(""), None);
        assert_eq!(normalize_domain("   \t"), None);
    }
}
