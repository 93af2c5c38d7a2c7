//! CSV export of a site's plan.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_db::models::PlanEntryWithDirectory;

use crate::error::Result;
use crate::plan::list_plan;

pub const CSV_HEADER: [&str; 7] = ["Directory", "URL", "DR", "Traffic", "Priority", "Status", "Notes"];

/// Write plan rows as CSV, every field quoted. Entries whose directory is
/// gone get empty directory cells.
pub fn write_plan_csv<W: Write>(entries: &[PlanEntryWithDirectory], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for row in entries {
        let (name, url, dr, traffic) = match &row.directory {
            // f64 Display prints integral values without a trailing ".0".
            Some(d) => (
                d.name.clone(),
                d.url.clone(),
                d.domain_rating.to_string(),
                d.monthly_traffic.to_string(),
            ),
            None => Default::default(),
        };
        wtr.write_record([
            name,
            url,
            dr,
            traffic,
            row.entry.priority.to_string(),
            row.entry.status.to_string(),
            row.entry.notes.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export the plan of `site_id` to `writer` in listing order.
pub async fn export_plan_csv<W: Write>(pool: &SqlitePool, site_id: Uuid, writer: W) -> Result<usize> {
    let entries = list_plan(pool, site_id).await?;
    write_plan_csv(&entries, writer)?;
    tracing::debug!(site_id = %site_id, rows = entries.len(), "exported plan csv");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use listlaunch_db::models::{Directory, PlanEntry, PlanStatus, SiteGoal};

    use super::*;

    fn row(directory: Option<Directory>, status: PlanStatus, notes: Option<&str>) -> PlanEntryWithDirectory {
        let now = Utc::now();
        PlanEntryWithDirectory {
            entry: PlanEntry {
                id: Uuid::new_v4(),
                site_id: Uuid::new_v4(),
                directory_id: Uuid::new_v4(),
                priority: 2,
                goal: SiteGoal::Dr,
                status,
                notes: notes.map(str::to_string),
                status_updated_at: None,
                submitted_at: None,
                live_at: None,
                created_at: now,
                updated_at: now,
            },
            directory,
        }
    }

    fn directory(name: &str, dr: f64) -> Directory {
        let now = Utc::now();
        Directory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: "https://betalist.com/".to_string(),
            domain_rating: dr,
            monthly_traffic: 350_000,
            niches: Vec::new(),
            is_premium: false,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn render(entries: &[PlanEntryWithDirectory]) -> String {
        let mut buf = Vec::new();
        write_plan_csv(entries, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_for_empty_plan() {
        assert_eq!(
            render(&[]),
            "\"Directory\",\"URL\",\"DR\",\"Traffic\",\"Priority\",\"Status\",\"Notes\"\n"
        );
    }

    #[test]
    fn rows_are_fully_quoted() {
        let out = render(&[row(
            Some(directory("BetaList", 72.0)),
            PlanStatus::InProgress,
            Some("said \"soon\""),
        )]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[1],
            "\"BetaList\",\"https://betalist.com/\",\"72\",\"350000\",\"2\",\"in_progress\",\"said \"\"soon\"\"\""
        );
    }

    #[test]
    fn fractional_dr_is_kept() {
        let out = render(&[row(Some(directory("X", 72.5)), PlanStatus::Planned, None)]);
        assert!(out.lines().nth(1).unwrap().contains("\"72.5\""));
    }

    #[test]
    fn missing_directory_renders_empty_cells() {
        let out = render(&[row(None, PlanStatus::Live, None)]);
        assert_eq!(out.lines().nth(1).unwrap(), "\"\",\"\",\"\",\"\",\"2\",\"live\",\"\"");
    }
}
