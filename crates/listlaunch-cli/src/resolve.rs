//! Argument resolution for IDs.
//!
//! - [`resolve_site`] accepts either a site UUID or a domain.
//! - [`parse_plan_id`] parses a plan entry UUID with a readable error.

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_core::site::{self, normalize_domain};
use listlaunch_db::models::Site;
use listlaunch_db::queries::sites as site_queries;

/// Look up a site by UUID, or by domain when `input` is not a UUID.
///
/// Domains are normalized the same way `site upsert` stores them, so
/// `Acme.IO` finds `acme.io`.
pub async fn resolve_site(pool: &SqlitePool, input: &str) -> Result<Site> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(site::get_site(pool, id).await?);
    }

    let Some(domain) = normalize_domain(input) else {
        bail!("site must be a UUID or a domain, got an empty string");
    };
    match site_queries::get_site_by_domain(pool, &domain).await? {
        Some(site) => Ok(site),
        None => bail!(
            "no site with domain {domain:?}.\n\
             Run `listlaunch site upsert {domain}` first to register it."
        ),
    }
}

/// Parse a plan entry ID.
pub fn parse_plan_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input).with_context(|| format!("invalid plan entry ID: {input:?}"))
}
