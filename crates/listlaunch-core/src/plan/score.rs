//! Directory scoring and ranking.
//!
//! ```text
//! awareness:  traffic * 1.0 + domain_rating * 1000
//! DR, mixed:  domain_rating * 10000 + traffic * 0.5
//! ```

use listlaunch_db::models::{Directory, SiteGoal};

/// Rank width of one priority band.
const BAND_SIZE: usize = 20;

/// Lowest priority a plan entry can get.
pub const MAX_PRIORITY: i64 = 5;

/// Score one directory for a site goal. Higher is better.
pub fn score_directory(directory: &Directory, goal: SiteGoal) -> f64 {
    let traffic = directory.monthly_traffic as f64;
    match goal {
        SiteGoal::Awareness => traffic * 1.0 + directory.domain_rating * 1000.0,
        SiteGoal::Dr | SiteGoal::Mixed => directory.domain_rating * 10000.0 + traffic * 0.5,
    }
}

/// Order directories best-first for `goal` and keep the top `limit`.
///
/// The sort is stable, so equal scores keep catalog order. A `limit` above
/// the catalog size returns the whole catalog.
pub fn rank_directories(directories: &[Directory], goal: SiteGoal, limit: usize) -> Vec<&Directory> {
    let mut scored: Vec<(f64, &Directory)> = directories
        .iter()
        .map(|d| (score_directory(d, goal), d))
        .collect();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored.into_iter().take(limit).map(|(_, d)| d).collect()
}

/// Priority for a 0-based rank: 1 for ranks 0-19, 2 for 20-39, and so on,
/// capped at 5.
pub fn priority_for_rank(rank: usize) -> i64 {
    let band = (rank / BAND_SIZE + 1) as i64;
    band.min(MAX_PRIORITY)
}
