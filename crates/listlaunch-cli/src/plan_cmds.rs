//! CLI handlers for `listlaunch plan` subcommands.
//!
//! Implements:
//! - `listlaunch plan generate <site>`           -- rank the catalog and extend the plan
//! - `listlaunch plan show <site>`               -- list plan entries
//! - `listlaunch plan status <plan-id> <status>` -- move an entry through its lifecycle
//! - `listlaunch plan notes <plan-id> [notes]`   -- replace entry notes
//! - `listlaunch plan export <site>`             -- CSV report

use anyhow::Result;
use sqlx::SqlitePool;

use listlaunch_core::{PlannerError, plan};
use listlaunch_db::models::{PlanEntry, PlanEntryWithDirectory, PlanStatus};

use crate::PlanCommands;
use crate::export_cmd;
use crate::resolve::{parse_plan_id, resolve_site};

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

pub async fn run_plan_command(command: PlanCommands, pool: &SqlitePool) -> Result<()> {
    match command {
        PlanCommands::Generate { site, count } => cmd_generate(pool, &site, count).await,
        PlanCommands::Show { site, json } => cmd_show(pool, &site, json).await,
        PlanCommands::Status {
            plan_id,
            status,
            notes,
        } => cmd_status(pool, &plan_id, &status, notes.as_deref()).await,
        PlanCommands::Notes { plan_id, notes } => cmd_notes(pool, &plan_id, notes.as_deref()).await,
        PlanCommands::Export { site, output } => {
            let site = resolve_site(pool, &site).await?;
            export_cmd::run_export_csv(pool, site.id, output.as_deref()).await
        }
    }
}

// -----------------------------------------------------------------------
// listlaunch plan generate <site>
// -----------------------------------------------------------------------

async fn cmd_generate(pool: &SqlitePool, site_input: &str, count: usize) -> Result<()> {
    let site = resolve_site(pool, site_input).await?;
    let outcome = plan::generate_plan(pool, site.id, count).await?;
    let total = plan::list_plan(pool, site.id).await?.len();

    println!("Plan generated for {} (goal {}).", site.domain, site.goal);
    println!();
    println!("  New entries:   {}", outcome.created);
    println!("  Total entries: {total}");
    Ok(())
}

// -----------------------------------------------------------------------
// listlaunch plan show <site>
// -----------------------------------------------------------------------

async fn cmd_show(pool: &SqlitePool, site_input: &str, json: bool) -> Result<()> {
    let site = resolve_site(pool, site_input).await?;
    let entries = plan::list_plan(pool, site.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "No plan entries for {}. Use `listlaunch plan generate {}` to create them.",
            site.domain, site.domain
        );
        return Ok(());
    }

    print_table(&entries);
    Ok(())
}

fn print_table(entries: &[PlanEntryWithDirectory]) {
    let name_w = entries
        .iter()
        .filter_map(|e| e.directory.as_ref().map(|d| d.name.len()))
        .max()
        .unwrap_or(9)
        .max(9);
    // Longest status is "in_progress".
    let status_w = 11;

    println!(
        "{:<36}  {:<name_w$}  {:>3}  {:<status_w$}  NOTES",
        "ID", "DIRECTORY", "PRI", "STATUS",
    );
    for e in entries {
        let name = e.directory.as_ref().map(|d| d.name.as_str()).unwrap_or("?");
        println!(
            "{:<36}  {:<name_w$}  {:>3}  {:<status_w$}  {}",
            e.entry.id,
            name,
            e.entry.priority,
            e.entry.status.to_string(),
            e.entry.notes.as_deref().unwrap_or(""),
        );
    }
}

// -----------------------------------------------------------------------
// listlaunch plan status / notes
// -----------------------------------------------------------------------

async fn cmd_status(pool: &SqlitePool, plan_id: &str, status: &str, notes: Option<&str>) -> Result<()> {
    let plan_id = parse_plan_id(plan_id)?;
    let status: PlanStatus = status.parse().map_err(PlannerError::from)?;

    let entry = plan::set_plan_status(pool, plan_id, status, notes).await?;
    println!("Plan entry updated.");
    println!();
    print_entry(&entry);
    Ok(())
}

async fn cmd_notes(pool: &SqlitePool, plan_id: &str, notes: Option<&str>) -> Result<()> {
    let plan_id = parse_plan_id(plan_id)?;

    let entry = plan::set_plan_notes(pool, plan_id, notes).await?;
    println!("Notes updated.");
    println!();
    print_entry(&entry);
    Ok(())
}

fn print_entry(entry: &PlanEntry) {
    const TS: &str = "%Y-%m-%d %H:%M:%S UTC";

    println!("  Plan entry: {}", entry.id);
    println!("  Status:     {}", entry.status);
    println!("  Priority:   {}", entry.priority);
    if let Some(notes) = &entry.notes {
        println!("  Notes:      {notes}");
    }
    if let Some(at) = entry.submitted_at {
        println!("  Submitted:  {}", at.format(TS));
    }
    if let Some(at) = entry.live_at {
        println!("  Live:       {}", at.format(TS));
    }
}
