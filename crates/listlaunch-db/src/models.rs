use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What a site wants out of its directory listings. Drives scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SiteGoal {
    /// Domain rating first: backlinks from high-authority directories.
    #[default]
    #[sqlx(rename = "DR")]
    #[serde(rename = "DR")]
    Dr,
    /// Traffic first: directories people actually browse.
    Awareness,
    Mixed,
}

impl fmt::Display for SiteGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dr => "DR",
            Self::Awareness => "awareness",
            Self::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

impl FromStr for SiteGoal {
    type Err = SiteGoalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DR" => Ok(Self::Dr),
            "awareness" => Ok(Self::Awareness),
            "mixed" => Ok(Self::Mixed),
            other => Err(SiteGoalParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`SiteGoal`] string.
#[derive(Debug, Clone)]
pub struct SiteGoalParseError(pub String);

impl fmt::Display for SiteGoalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid site goal: {:?}", self.0)
    }
}

impl std::error::Error for SiteGoalParseError {}

// ---------------------------------------------------------------------------

/// Submission status of a plan entry.
///
/// Any status may follow any other; there is no transition graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Planned,
    InProgress,
    Submitted,
    Live,
    Skipped,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Live => "live",
            Self::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanStatus {
    type Err = PlanStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "in_progress" => Ok(Self::InProgress),
            "submitted" => Ok(Self::Submitted),
            "live" => Ok(Self::Live),
            "skipped" => Ok(Self::Skipped),
            other => Err(PlanStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanStatus`] string.
#[derive(Debug, Clone)]
pub struct PlanStatusParseError(pub String);

impl fmt::Display for PlanStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan status: {:?}", self.0)
    }
}

impl std::error::Error for PlanStatusParseError {}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A site being promoted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Site {
    pub id: Uuid,
    /// Trimmed, lowercased domain. Unique.
    pub domain: String,
    pub name: Option<String>,
    pub goal: SiteGoal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A third-party listing site from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Directory {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    /// Authority score, 0-100.
    pub domain_rating: f64,
    pub monthly_traffic: i64,
    #[sqlx(json)]
    pub niches: Vec<String>,
    pub is_premium: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A planned submission of one site to one directory.
///
/// `goal` is the site's goal at generation time, not the live value.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanEntry {
    pub id: Uuid,
    pub site_id: Uuid,
    pub directory_id: Uuid,
    /// 1 (submit first) through 5.
    pub priority: i64,
    pub goal: SiteGoal,
    pub status: PlanStatus,
    pub notes: Option<String>,
    pub status_updated_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub live_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A plan entry together with the directory it points at.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntryWithDirectory {
    #[serde(flatten)]
    pub entry: PlanEntry,
    pub directory: Option<Directory>,
}

/// Marketing copy for one plan entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionPack {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub tagline: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    #[sqlx(json)]
    pub categories: Vec<String>,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub utm_url: Option<String>,
    pub cta: Option<String>,
    #[sqlx(json)]
    pub extra_fields: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
