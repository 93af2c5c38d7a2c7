//! CLI handlers for `listlaunch directory` subcommands.

use anyhow::Result;
use sqlx::SqlitePool;

use listlaunch_core::catalog::{self, DirectoryFilter};
use listlaunch_db::models::Directory;

use crate::DirectoryCommands;

pub async fn run_directory_command(command: DirectoryCommands, pool: &SqlitePool) -> Result<()> {
    match command {
        DirectoryCommands::List {
            niche,
            min_dr,
            max_dr,
            premium_only,
            json,
        } => {
            let filter = DirectoryFilter {
                niche,
                min_dr,
                max_dr,
                premium_only,
            };
            cmd_list(pool, &filter, json).await
        }
        DirectoryCommands::Seed => cmd_seed(pool).await,
    }
}

async fn cmd_list(pool: &SqlitePool, filter: &DirectoryFilter, json: bool) -> Result<()> {
    let directories = catalog::list_directories(pool, filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&directories)?);
        return Ok(());
    }

    if directories.is_empty() {
        println!("No directories found. Use `listlaunch directory seed` to load the starter catalog.");
        return Ok(());
    }

    print_table(&directories);
    Ok(())
}

fn print_table(directories: &[Directory]) {
    let name_w = directories
        .iter()
        .map(|d| d.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:<name_w$}  {:>5}  {:>10}  {:<7}  NICHES",
        "NAME", "DR", "TRAFFIC", "PREMIUM",
    );
    for d in directories {
        println!(
            "{:<name_w$}  {:>5}  {:>10}  {:<7}  {}",
            d.name,
            d.domain_rating,
            d.monthly_traffic,
            if d.is_premium { "yes" } else { "" },
            d.niches.join(", "),
        );
    }
}

async fn cmd_seed(pool: &SqlitePool) -> Result<()> {
    let outcome = catalog::seed_directories(pool).await?;
    if outcome.inserted == 0 {
        println!("Catalog already has directories; nothing inserted.");
    } else {
        println!("Inserted {} starter directories.", outcome.inserted);
    }
    Ok(())
}
