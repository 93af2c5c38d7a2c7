//! CLI handlers for `listlaunch site` subcommands.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_core::site::{self, SiteInput};
use listlaunch_core::{PlannerError, plan};
use listlaunch_db::models::{Site, SiteGoal};

use crate::SiteCommands;
use crate::resolve::resolve_site;

pub async fn run_site_command(command: SiteCommands, pool: &SqlitePool) -> Result<()> {
    match command {
        SiteCommands::Upsert {
            domain,
            name,
            goal,
            notes,
            id,
        } => {
            let goal = goal
                .map(|g| g.parse::<SiteGoal>().map_err(PlannerError::from))
                .transpose()?;
            let id = id
                .map(|raw| Uuid::parse_str(&raw).with_context(|| format!("invalid site ID: {raw:?}")))
                .transpose()?;
            let input = SiteInput {
                id,
                domain,
                name,
                goal,
                notes,
            };
            cmd_upsert(pool, input).await
        }
        SiteCommands::List { json } => cmd_list(pool, json).await,
        SiteCommands::Show { site } => cmd_show(pool, &site).await,
    }
}

async fn cmd_upsert(pool: &SqlitePool, input: SiteInput) -> Result<()> {
    let site = site::upsert_site(pool, input).await?;

    println!("Site saved.");
    println!();
    print_site(&site);
    println!();
    println!("Next: run `listlaunch plan generate {}` to build its plan.", site.domain);
    Ok(())
}

async fn cmd_list(pool: &SqlitePool, json: bool) -> Result<()> {
    let sites = site::list_sites(pool).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sites)?);
        return Ok(());
    }

    if sites.is_empty() {
        println!("No sites found. Use `listlaunch site upsert <domain>` to add one.");
        return Ok(());
    }

    let domain_w = sites.iter().map(|s| s.domain.len()).max().unwrap_or(6).max(6);
    println!("{:<36}  {:<domain_w$}  {:<9}  NAME", "ID", "DOMAIN", "GOAL");
    for s in &sites {
        println!(
            "{:<36}  {:<domain_w$}  {:<9}  {}",
            s.id,
            s.domain,
            s.goal.to_string(),
            s.name.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

async fn cmd_show(pool: &SqlitePool, input: &str) -> Result<()> {
    let site = resolve_site(pool, input).await?;
    let entries = plan::list_plan(pool, site.id).await?;

    print_site(&site);
    println!("  Plan entries: {}", entries.len());
    Ok(())
}

fn print_site(site: &Site) {
    println!("Site: {}", site.domain);
    println!("  ID:      {}", site.id);
    if let Some(name) = &site.name {
        println!("  Name:    {name}");
    }
    println!("  Goal:    {}", site.goal);
    if let Some(notes) = &site.notes {
        println!("  Notes:   {notes}");
    }
    println!(
        "  Updated: {}",
        site.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
