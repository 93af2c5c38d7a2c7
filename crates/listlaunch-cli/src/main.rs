mod config;
mod directory_cmds;
mod export_cmd;
mod pack_cmds;
mod plan_cmds;
mod resolve;
mod serve_cmd;
mod site_cmds;
#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use listlaunch_db::pool;

use config::ListlaunchConfig;

#[derive(Parser)]
#[command(name = "listlaunch", version, about = "Plan and track directory submissions for your sites")]
struct Cli {
    /// Database URL (overrides LISTLAUNCH_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a listlaunch config file (no database required)
    Init {
        /// SQLite connection URL
        #[arg(long, default_value = "sqlite://listlaunch.db")]
        db_url: String,
        /// OpenAI API key used to generate submission packs
        #[arg(long)]
        api_key: Option<String>,
        /// Model used to generate submission packs
        #[arg(long)]
        model: Option<String>,
        /// Base URL of the OpenAI-compatible API
        #[arg(long)]
        base_url: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create the database and run migrations
    DbInit,
    /// Directory catalog
    Directory {
        #[command(subcommand)]
        command: DirectoryCommands,
    },
    /// Site profiles
    Site {
        #[command(subcommand)]
        command: SiteCommands,
    },
    /// Submission plans
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Submission packs
    Pack {
        #[command(subcommand)]
        command: PackCommands,
    },
    /// Start the JSON API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[derive(Subcommand)]
pub enum DirectoryCommands {
    /// List the catalog
    List {
        /// Only directories tagged with this niche
        #[arg(long)]
        niche: Option<String>,
        /// Minimum domain rating (inclusive)
        #[arg(long)]
        min_dr: Option<f64>,
        /// Maximum domain rating (inclusive)
        #[arg(long)]
        max_dr: Option<f64>,
        /// Only premium directories
        #[arg(long)]
        premium_only: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Insert the starter directories into an empty catalog
    Seed,
}

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Create a site, or update the one with the same domain (or --id)
    Upsert {
        /// Site domain, e.g. acme.io
        domain: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Goal: DR, awareness, or mixed
        #[arg(long)]
        goal: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Update this site ID instead of matching by domain
        #[arg(long)]
        id: Option<String>,
    },
    /// List all sites
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one site
    Show {
        /// Site ID or domain
        site: String,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Rank the catalog for a site and add the top directories to its plan
    Generate {
        /// Site ID or domain
        site: String,
        /// Number of directories to target
        #[arg(long, default_value_t = listlaunch_core::plan::DEFAULT_DESIRED_COUNT)]
        count: usize,
    },
    /// Show a site's plan
    Show {
        /// Site ID or domain
        site: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Set the status of a plan entry
    Status {
        /// Plan entry ID
        plan_id: String,
        /// planned, in_progress, submitted, live, or skipped
        status: String,
        /// Notes to store with the update (omitting clears them)
        #[arg(long)]
        notes: Option<String>,
    },
    /// Replace the notes of a plan entry
    Notes {
        /// Plan entry ID
        plan_id: String,
        /// New notes (omit to clear)
        notes: Option<String>,
    },
    /// Export a site's plan as CSV
    Export {
        /// Site ID or domain
        site: String,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PackCommands {
    /// Show the submission pack of a plan entry
    Show {
        /// Plan entry ID
        plan_id: String,
    },
    /// Save a submission pack from a JSON file (or stdin)
    Save {
        /// Plan entry ID
        plan_id: String,
        /// JSON file with the pack fields (defaults to stdin)
        #[arg(long)]
        file: Option<String>,
    },
    /// Generate a submission pack with the configured model
    Generate {
        /// Plan entry ID
        plan_id: String,
        /// Regenerate even if a pack already exists
        #[arg(long)]
        force: bool,
    },
}

/// Execute the `listlaunch init` command: write config file.
fn cmd_init(
    db_url: &str,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let has_key = api_key.is_some();
    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        generator: config::GeneratorSection {
            api_key,
            model,
            base_url,
        },
    };

    let path = config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    if has_key {
        println!("  generator.api_key = (set)");
    } else {
        println!("  generator.api_key not set; pack generation needs OPENAI_API_KEY");
    }
    println!();
    println!("Next: run `listlaunch db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `listlaunch db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = ListlaunchConfig::resolve(cli_db_url)?;

    println!("Initializing listlaunch database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("listlaunch db-init complete.");
    Ok(())
}

/// Open the pool and bring the schema up to date. Migrations are
/// idempotent, so every command can run against a fresh SQLite file.
async fn open_pool(resolved: &ListlaunchConfig) -> anyhow::Result<SqlitePool> {
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;
    Ok(db_pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            api_key,
            model,
            base_url,
            force,
        } => {
            cmd_init(&db_url, api_key, model, base_url, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Directory { command } => {
            let resolved = ListlaunchConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = open_pool(&resolved).await?;
            let result = directory_cmds::run_directory_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Site { command } => {
            let resolved = ListlaunchConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = open_pool(&resolved).await?;
            let result = site_cmds::run_site_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Plan { command } => {
            let resolved = ListlaunchConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = open_pool(&resolved).await?;
            let result = plan_cmds::run_plan_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Pack { command } => {
            let resolved = ListlaunchConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = open_pool(&resolved).await?;
            let generator = resolved.build_generator();
            let result = pack_cmds::run_pack_command(command, &db_pool, generator.as_ref()).await;
            db_pool.close().await;
            result?;
        }
        Commands::Serve { bind, port } => {
            let resolved = ListlaunchConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = open_pool(&resolved).await?;
            let generator = resolved.build_generator();
            if generator.is_none() {
                tracing::warn!("no OpenAI API key configured; pack generation will fail");
            }
            let result = serve_cmd::run_serve(db_pool.clone(), generator, &bind, port).await;
            db_pool.close().await;
            result?;
        }
    }

    Ok(())
}
