use std::io::Write;

use anyhow::Context;
use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_core::export::export_plan_csv;

/// Export a site's plan as CSV to a file or stdout.
pub async fn run_export_csv(pool: &SqlitePool, site_id: Uuid, output: Option<&str>) -> anyhow::Result<()> {
    let writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {path}"))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };

    let rows = export_plan_csv(pool, site_id, writer).await?;

    if let Some(path) = output {
        println!("Exported {rows} rows to {path}");
    }

    Ok(())
}
