//! Submission plans: scoring, generation, and lifecycle tracking.

pub mod generate;
pub mod lifecycle;
pub mod score;

pub use generate::{
    DEFAULT_DESIRED_COUNT, GeneratePlanOutcome, generate_plan, get_plan_entry, list_plan,
};
pub use lifecycle::{set_plan_notes, set_plan_status};
pub use score::{priority_for_rank, rank_directories, score_directory};
