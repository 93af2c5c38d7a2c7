//! Directory submission planning: catalog, site profiles, ranked plans,
//! status tracking, generated submission packs, and CSV export.

pub mod catalog;
pub mod error;
pub mod export;
pub mod generator;
pub mod pack;
pub mod plan;
pub mod site;

pub use error::{PlannerError, Result};
