//! Error taxonomy for planner operations.
//!
//! Every public operation fails with exactly one [`PlannerError`] kind.
//! Database failures from the query layer arrive as [`anyhow::Error`] and are
//! classified on conversion: unique-index violations become
//! [`PlannerError::DuplicateKey`], everything else [`PlannerError::Store`].

use listlaunch_db::models::{PlanStatusParseError, SiteGoalParseError};

use crate::generator::GeneratorError;

/// Failure of a planner operation.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A referenced site, directory, plan entry, or pack does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Plan generation was attempted before the catalog was seeded.
    #[error("no directories in the catalog yet; seed it first")]
    EmptyCatalog,

    /// A required external-service setting is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The text-generation provider failed.
    #[error("text generation failed: {0}")]
    Upstream(#[from] GeneratorError),

    /// The generator output contained no parseable JSON.
    #[error("malformed generator response: {0}")]
    MalformedResponse(String),

    /// Parsed JSON did not match the submission pack schema.
    #[error("submission pack does not match schema: {0}")]
    SchemaViolation(String),

    #[error(transparent)]
    InvalidStatus(#[from] PlanStatusParseError),

    #[error(transparent)]
    InvalidGoal(#[from] SiteGoalParseError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A write collided with a unique index.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("failed to write CSV export: {0}")]
    Export(#[from] csv::Error),

    #[error("store error: {0:#}")]
    Store(anyhow::Error),
}

impl PlannerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<anyhow::Error> for PlannerError {
    fn from(err: anyhow::Error) -> Self {
        let unique_violation = err
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .is_some_and(|e| e.is_unique_violation());

        if unique_violation {
            Self::DuplicateKey(format!("{err:#}"))
        } else {
            Self::Store(err)
        }
    }
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
