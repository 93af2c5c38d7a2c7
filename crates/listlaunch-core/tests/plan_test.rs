//! Integration tests for plan generation and the plan lifecycle.

use std::collections::HashSet;

use sqlx::SqlitePool;
use uuid::Uuid;

use listlaunch_core::PlannerError;
use listlaunch_core::catalog;
use listlaunch_core::plan::{self, DEFAULT_DESIRED_COUNT};
use listlaunch_core::site::{self, SiteInput};
use listlaunch_db::models::{PlanStatus, Site, SiteGoal};
use listlaunch_db::queries::directories::{self, NewDirectory};
use listlaunch_test_utils::create_test_db;

async fn site_with_goal(pool: &SqlitePool, domain: &str, goal: SiteGoal) -> Site {
    site::upsert_site(
        pool,
        SiteInput {
            domain: domain.to_string(),
            goal: Some(goal),
            ..Default::default()
        },
    )
    .await
    .expect("upsert_site should succeed")
}

/// Insert `n` directories with strictly decreasing DR (staying inside
/// 0-100 up to n = 200), so catalog order is also rank order for the DR goal.
async fn seed_ranked_directories(pool: &SqlitePool, n: usize) {
    let niches: Vec<String> = Vec::new();
    for i in 0..n {
        let name = format!("Directory {i:03}");
        directories::insert_directory(
            pool,
            &NewDirectory {
                name: &name,
                url: "https://dir.example/",
                domain_rating: 100.0 - i as f64 * 0.5,
                monthly_traffic: 1000,
                niches: &niches,
                is_premium: false,
                notes: None,
            },
        )
        .await
        .expect("insert_directory should succeed");
    }
}

// -----------------------------------------------------------------------
// Generation
// -----------------------------------------------------------------------

#[tokio::test]
async fn generate_for_missing_site_is_not_found() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();

    let err = plan::generate_plan(&pool, Uuid::new_v4(), DEFAULT_DESIRED_COUNT)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { entity: "site", .. }), "{err}");

    pool.close().await;
}

#[tokio::test]
async fn generate_with_empty_catalog_fails() {
    let (pool, _db) = create_test_db().await;
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;

    let err = plan::generate_plan(&pool, site.id, DEFAULT_DESIRED_COUNT)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::EmptyCatalog), "{err}");
    assert!(plan::list_plan(&pool, site.id).await.unwrap().is_empty());

    pool.close().await;
}

#[tokio::test]
async fn starter_catalog_ranks_for_dr_goal() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;

    let outcome = plan::generate_plan(&pool, site.id, 4).await.unwrap();
    assert_eq!(outcome.created, 4);

    let entries = plan::list_plan(&pool, site.id).await.unwrap();
    let names: Vec<&str> = entries
        .iter()
        .map(|e| e.directory.as_ref().unwrap().name.as_str())
        .collect();
    assert_eq!(names, ["Product Hunt", "Capterra", "GetApp", "Software Advice"]);
    assert!(entries.iter().all(|e| e.entry.priority == 1));
    assert!(entries.iter().all(|e| e.entry.status == PlanStatus::Planned));

    pool.close().await;
}

async fn insert_directory(pool: &SqlitePool, name: &str, dr: f64, traffic: i64) {
    directories::insert_directory(
        pool,
        &NewDirectory {
            name,
            url: "https://dir.example/",
            domain_rating: dr,
            monthly_traffic: traffic,
            niches: &[],
            is_premium: false,
            notes: None,
        },
    )
    .await
    .expect("insert_directory should succeed");
}

async fn ranked_names(pool: &SqlitePool, goal: SiteGoal) -> Vec<String> {
    let site = site_with_goal(pool, &format!("{goal}.example"), goal).await;
    plan::generate_plan(pool, site.id, DEFAULT_DESIRED_COUNT)
        .await
        .unwrap();
    plan::list_plan(pool, site.id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.directory.unwrap().name)
        .collect()
}

#[tokio::test]
async fn goal_decides_ranking() {
    let (pool, _db) = create_test_db().await;
    // DR goal: A = 900050, B = 500500, C = 200000.
    // Awareness: C = 210000, A = 90100, B = 51000.
    insert_directory(&pool, "B", 50.0, 1000).await;
    insert_directory(&pool, "C", 10.0, 200_000).await;
    insert_directory(&pool, "A", 90.0, 100).await;

    assert_eq!(ranked_names(&pool, SiteGoal::Dr).await, ["A", "B", "C"]);
    assert_eq!(ranked_names(&pool, SiteGoal::Mixed).await, ["A", "B", "C"]);
    assert_eq!(ranked_names(&pool, SiteGoal::Awareness).await, ["C", "A", "B"]);

    pool.close().await;
}

#[tokio::test]
async fn repeated_generation_never_duplicates() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;

    assert_eq!(plan::generate_plan(&pool, site.id, 5).await.unwrap().created, 5);
    assert_eq!(plan::generate_plan(&pool, site.id, 5).await.unwrap().created, 0);
    assert_eq!(plan::generate_plan(&pool, site.id, 8).await.unwrap().created, 3);
    assert_eq!(
        plan::generate_plan(&pool, site.id, DEFAULT_DESIRED_COUNT)
            .await
            .unwrap()
            .created,
        2,
        "count is clamped to the catalog size"
    );

    let entries = plan::list_plan(&pool, site.id).await.unwrap();
    assert_eq!(entries.len(), 10);
    let unique: HashSet<Uuid> = entries.iter().map(|e| e.entry.directory_id).collect();
    assert_eq!(unique.len(), 10);

    pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_generation_serializes() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;

    let (first, second) = tokio::join!(
        plan::generate_plan(&pool, site.id, DEFAULT_DESIRED_COUNT),
        plan::generate_plan(&pool, site.id, DEFAULT_DESIRED_COUNT),
    );
    let first = first.expect("first generation should succeed");
    let second = second.expect("second generation should succeed");
    assert_eq!(first.created + second.created, 10);

    let entries = plan::list_plan(&pool, site.id).await.unwrap();
    let unique: HashSet<Uuid> = entries.iter().map(|e| e.entry.directory_id).collect();
    assert_eq!(entries.len(), 10);
    assert_eq!(unique.len(), 10);

    pool.close().await;
}

#[tokio::test]
async fn priorities_follow_rank_bands() {
    let (pool, _db) = create_test_db().await;
    seed_ranked_directories(&pool, 110).await;
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;

    let outcome = plan::generate_plan(&pool, site.id, DEFAULT_DESIRED_COUNT)
        .await
        .unwrap();
    assert_eq!(outcome.created, 100);

    let entries = plan::list_plan(&pool, site.id).await.unwrap();
    for (rank, e) in entries.iter().enumerate() {
        let expected = (rank / 20 + 1).min(5) as i64;
        assert_eq!(e.entry.priority, expected, "rank {rank}");
        assert_eq!(
            e.directory.as_ref().unwrap().name,
            format!("Directory {rank:03}")
        );
    }

    pool.close().await;
}

#[tokio::test]
async fn goal_is_snapshotted_on_entries() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;
    plan::generate_plan(&pool, site.id, 4).await.unwrap();

    site_with_goal(&pool, "acme.io", SiteGoal::Awareness).await;
    plan::generate_plan(&pool, site.id, 10).await.unwrap();

    let entries = plan::list_plan(&pool, site.id).await.unwrap();
    let dr_goal = entries.iter().filter(|e| e.entry.goal == SiteGoal::Dr).count();
    let awareness_goal = entries
        .iter()
        .filter(|e| e.entry.goal == SiteGoal::Awareness)
        .count();
    assert_eq!(dr_goal, 4, "existing entries keep their goal");
    assert_eq!(awareness_goal, 6);

    pool.close().await;
}

#[tokio::test]
async fn list_plan_for_missing_site_is_not_found() {
    let (pool, _db) = create_test_db().await;

    let err = plan::list_plan(&pool, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }), "{err}");

    pool.close().await;
}

// -----------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------

#[tokio::test]
async fn status_updates_stamp_timestamps() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;
    plan::generate_plan(&pool, site.id, 1).await.unwrap();
    let plan_id = plan::list_plan(&pool, site.id).await.unwrap()[0].entry.id;

    let in_progress = plan::set_plan_status(&pool, plan_id, PlanStatus::InProgress, Some("drafting"))
        .await
        .unwrap();
    assert_eq!(in_progress.status, PlanStatus::InProgress);
    assert_eq!(in_progress.notes.as_deref(), Some("drafting"));
    assert!(in_progress.status_updated_at.is_some());
    assert!(in_progress.submitted_at.is_none());
    assert!(in_progress.live_at.is_none());

    let submitted = plan::set_plan_status(&pool, plan_id, PlanStatus::Submitted, None)
        .await
        .unwrap();
    let first_submit = submitted.submitted_at.expect("submitted stamps submitted_at");
    assert!(submitted.notes.is_none(), "absent notes clear the stored notes");
    assert!(submitted.live_at.is_none());

    let live = plan::set_plan_status(&pool, plan_id, PlanStatus::Live, None)
        .await
        .unwrap();
    assert_eq!(live.submitted_at, Some(first_submit));
    assert!(live.live_at.is_some());

    let resubmitted = plan::set_plan_status(&pool, plan_id, PlanStatus::Submitted, None)
        .await
        .unwrap();
    assert!(resubmitted.submitted_at.unwrap() >= first_submit);
    assert_eq!(resubmitted.live_at, live.live_at, "live_at survives leaving live");

    let skipped = plan::set_plan_status(&pool, plan_id, PlanStatus::Skipped, None)
        .await
        .unwrap();
    assert_eq!(skipped.status, PlanStatus::Skipped);
    assert_eq!(skipped.submitted_at, resubmitted.submitted_at);

    pool.close().await;
}

#[tokio::test]
async fn notes_update_keeps_status() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();
    let site = site_with_goal(&pool, "acme.io", SiteGoal::Dr).await;
    plan::generate_plan(&pool, site.id, 1).await.unwrap();
    let plan_id = plan::list_plan(&pool, site.id).await.unwrap()[0].entry.id;

    let entry = plan::set_plan_notes(&pool, plan_id, Some("needs screenshots"))
        .await
        .unwrap();
    assert_eq!(entry.notes.as_deref(), Some("needs screenshots"));
    assert_eq!(entry.status, PlanStatus::Planned);
    assert!(entry.status_updated_at.is_none());

    pool.close().await;
}

#[tokio::test]
async fn lifecycle_on_missing_entry_is_not_found() {
    let (pool, _db) = create_test_db().await;

    let err = plan::set_plan_status(&pool, Uuid::new_v4(), PlanStatus::Live, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }), "{err}");

    let err = plan::set_plan_notes(&pool, Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }), "{err}");

    pool.close().await;
}

#[test]
fn unknown_status_is_invalid_status() {
    let err: PlannerError = "done".parse::<PlanStatus>().unwrap_err().into();
    assert!(matches!(err, PlannerError::InvalidStatus(_)));
}
