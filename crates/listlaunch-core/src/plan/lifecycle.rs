//! Plan entry lifecycle: status and notes.
//!
//! Any status may follow any other. Two statuses carry timestamps:
//!
//! ```text
//! submitted -> submitted_at = now  (overwritten on every transition)
//! live      -> live_at      = now
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_db::models::{PlanEntry, PlanStatus};
use listlaunch_db::queries::plans as plan_queries;

use super::generate::get_plan_entry;
use crate::error::{PlannerError, Result};

/// Timestamps a transition into `status` stamps, as `(submitted_at, live_at)`.
fn stamps_for(status: PlanStatus, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    match status {
        PlanStatus::Submitted => (Some(now), None),
        PlanStatus::Live => (None, Some(now)),
        PlanStatus::Planned | PlanStatus::InProgress | PlanStatus::Skipped => (None, None),
    }
}

/// Move a plan entry to `status` and replace its notes.
///
/// `notes: None` clears the stored notes. Returns the updated entry.
pub async fn set_plan_status(
    pool: &SqlitePool,
    plan_id: Uuid,
    status: PlanStatus,
    notes: Option<&str>,
) -> Result<PlanEntry> {
    let now = Utc::now();
    let (submitted_at, live_at) = stamps_for(status, now);

    let rows = plan_queries::update_plan_status(pool, plan_id, status, notes, now, submitted_at, live_at).await?;
    if rows == 0 {
        return Err(PlannerError::not_found("plan entry", plan_id));
    }

    tracing::info!(plan_id = %plan_id, %status, "updated plan status");
    get_plan_entry(pool, plan_id).await
}

/// Replace the notes of a plan entry without touching its status.
pub async fn set_plan_notes(pool: &SqlitePool, plan_id: Uuid, notes: Option<&str>) -> Result<PlanEntry> {
    let rows = plan_queries::update_plan_notes(pool, plan_id, notes).await?;
    if rows == 0 {
        return Err(PlannerError::not_found("plan entry", plan_id));
    }

    tracing::debug!(plan_id = %plan_id, "updated plan notes");
    get_plan_entry(pool, plan_id).await
}
