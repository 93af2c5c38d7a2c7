//! Submission packs: per-directory marketing copy.
//!
//! ```text
//! generate_pack(plan_id)
//!     -> existing pack?  (returned as-is unless forced)
//!     -> build_request(site, entry, directory)
//!     -> TextGenerator::generate
//!     -> extract_json -> PackDraft::from_value
//!     -> save_pack (upsert on plan_id)
//! ```

pub mod extract;
pub mod prompt;
pub mod schema;
pub mod service;

pub use extract::extract_json;
pub use prompt::{build_request, utm_source};
pub use schema::PackDraft;
pub use service::{generate_pack, get_pack, save_pack};
