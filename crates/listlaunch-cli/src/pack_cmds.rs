//! CLI handlers for `listlaunch pack` subcommands.

use std::io::Read;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use listlaunch_core::generator::{OpenAiGenerator, TextGenerator};
use listlaunch_core::pack::{self, PackDraft};
use listlaunch_db::models::SubmissionPack;

use crate::PackCommands;
use crate::resolve::parse_plan_id;

pub async fn run_pack_command(
    command: PackCommands,
    pool: &SqlitePool,
    generator: Option<&OpenAiGenerator>,
) -> Result<()> {
    match command {
        PackCommands::Show { plan_id } => cmd_show(pool, &plan_id).await,
        PackCommands::Save { plan_id, file } => cmd_save(pool, &plan_id, file.as_deref()).await,
        PackCommands::Generate { plan_id, force } => {
            let generator = generator.map(|g| g as &dyn TextGenerator);
            cmd_generate(pool, generator, &plan_id, force).await
        }
    }
}

async fn cmd_show(pool: &SqlitePool, plan_id: &str) -> Result<()> {
    let plan_id = parse_plan_id(plan_id)?;
    match pack::get_pack(pool, plan_id).await? {
        Some(saved) => print_pack(&saved)?,
        None => println!(
            "No pack for plan entry {plan_id}. Use `listlaunch pack generate {plan_id}` to create one."
        ),
    }
    Ok(())
}

async fn cmd_save(pool: &SqlitePool, plan_id: &str, file: Option<&str>) -> Result<()> {
    let plan_id = parse_plan_id(plan_id)?;

    let contents = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pack file: {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read pack JSON from stdin")?;
            buf
        }
    };
    let draft = PackDraft::from_json(&contents)?;

    let saved = pack::save_pack(pool, plan_id, draft).await?;
    println!("Pack saved ({}).", saved.id);
    Ok(())
}

async fn cmd_generate(
    pool: &SqlitePool,
    generator: Option<&dyn TextGenerator>,
    plan_id: &str,
    force: bool,
) -> Result<()> {
    let plan_id = parse_plan_id(plan_id)?;
    let generated = pack::generate_pack(pool, generator, plan_id, force).await?;
    print_pack(&generated)
}

/// Print the pack in its exchange format.
fn print_pack(saved: &SubmissionPack) -> Result<()> {
    let draft = PackDraft::from(saved.clone());
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}
