//! Integration tests for the directory catalog and site profiles.

use uuid::Uuid;

use listlaunch_core::PlannerError;
use listlaunch_core::catalog::{self, DirectoryFilter};
use listlaunch_core::site::{self, SiteInput};
use listlaunch_db::models::SiteGoal;
use listlaunch_test_utils::create_test_db;

fn input(domain: &str) -> SiteInput {
    SiteInput {
        domain: domain.to_string(),
        ..Default::default()
    }
}

// -----------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------

#[tokio::test]
async fn seed_inserts_starters_once() {
    let (pool, _db) = create_test_db().await;

    let first = catalog::seed_directories(&pool).await.unwrap();
    assert_eq!(first.inserted, 10);

    let second = catalog::seed_directories(&pool).await.unwrap();
    assert_eq!(second.inserted, 0);

    let all = catalog::list_directories(&pool, &DirectoryFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(all[0].name, "Capterra");
    assert_eq!(all[0].notes.as_deref(), Some("High authority software directory"));
    assert_eq!(all[9].name, "BetaList");

    pool.close().await;
}

#[tokio::test]
async fn list_directories_applies_filters() {
    let (pool, _db) = create_test_db().await;
    catalog::seed_directories(&pool).await.unwrap();

    let premium = catalog::list_directories(
        &pool,
        &DirectoryFilter {
            premium_only: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let names: Vec<&str> = premium.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Capterra", "GetApp", "Software Advice"]);

    let startups = catalog::list_directories(
        &pool,
        &DirectoryFilter {
            niche: Some("Startups".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let names: Vec<&str> = startups.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Indie Hackers", "BetaList"]);

    let band = catalog::list_directories(
        &pool,
        &DirectoryFilter {
            min_dr: Some(72.0),
            max_dr: Some(78.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let names: Vec<&str> = band.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Futurepedia", "SaaSworthy", "BetaList"]);

    let unbounded = catalog::list_directories(
        &pool,
        &DirectoryFilter {
            max_dr: Some(0.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(unbounded.len(), 10, "max_dr of 0 applies no bound");

    pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_seeds_insert_once() {
    let (pool, _db) = create_test_db().await;

    let (first, second) = tokio::join!(
        catalog::seed_directories(&pool),
        catalog::seed_directories(&pool),
    );
    let first = first.expect("first seed should succeed");
    let second = second.expect("second seed should succeed");
    assert_eq!(first.inserted + second.inserted, 10);

    let all = catalog::list_directories(&pool, &DirectoryFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 10);

    pool.close().await;
}

// -----------------------------------------------------------------------
// Sites
// -----------------------------------------------------------------------

#[tokio::test]
async fn upsert_by_domain_normalizes_and_dedupes() {
    let (pool, _db) = create_test_db().await;

    let created = site::upsert_site(
        &pool,
        SiteInput {
            domain: "  Acme.IO ".to_string(),
            name: Some("Acme".to_string()),
            notes: Some("launch in May".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(created.domain, "acme.io");
    assert_eq!(created.goal, SiteGoal::Dr);

    let patched = site::upsert_site(
        &pool,
        SiteInput {
            domain: "acme.io".to_string(),
            goal: Some(SiteGoal::Awareness),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(patched.id, created.id);
    assert_eq!(patched.goal, SiteGoal::Awareness);
    assert_eq!(patched.name.as_deref(), Some("Acme"), "absent name keeps stored value");
    assert_eq!(patched.notes.as_deref(), Some("launch in May"));

    assert_eq!(site::list_sites(&pool).await.unwrap().len(), 1);

    pool.close().await;
}

#[tokio::test]
async fn upsert_by_id_replaces_fields() {
    let (pool, _db) = create_test_db().await;

    let created = site::upsert_site(
        &pool,
        SiteInput {
            domain: "acme.io".to_string(),
            name: Some("Acme".to_string()),
            goal: Some(SiteGoal::Mixed),
            notes: Some("n".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let updated = site::upsert_site(
        &pool,
        SiteInput {
            id: Some(created.id),
            domain: "ACME.dev".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.domain, "acme.dev");
    assert_eq!(updated.goal, SiteGoal::Mixed, "absent goal keeps stored goal");
    assert!(updated.name.is_none());
    assert!(updated.notes.is_none());

    let fetched = site::get_site(&pool, created.id).await.unwrap();
    assert_eq!(fetched.domain, "acme.dev");

    pool.close().await;
}

#[tokio::test]
async fn upsert_by_id_rejects_taken_domain() {
    let (pool, _db) = create_test_db().await;

    site::upsert_site(&pool, input("taken.io")).await.unwrap();
    let other = site::upsert_site(&pool, input("other.io")).await.unwrap();

    let err = site::upsert_site(
        &pool,
        SiteInput {
            id: Some(other.id),
            domain: "taken.io".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlannerError::DuplicateKey(_)), "{err}");

    pool.close().await;
}

#[tokio::test]
async fn upsert_rejects_blank_domain_and_unknown_id() {
    let (pool, _db) = create_test_db().await;

    let err = site::upsert_site(&pool, input("   ")).await.unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput(_)), "{err}");

    let err = site::upsert_site(
        &pool,
        SiteInput {
            id: Some(Uuid::new_v4()),
            domain: "x.io".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { entity: "site", .. }), "{err}");

    let err = site::get_site(&pool, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }));

    pool.close().await;
}
