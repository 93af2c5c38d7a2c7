//! Shared test utilities for listlaunch integration tests.
//!
//! Every test gets its own SQLite database file inside a temporary
//! directory, with migrations applied. The directory (and the database with
//! it) is removed when the returned [`TestDb`] guard is dropped.

use listlaunch_db::config::DbConfig;
use listlaunch_db::pool;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Keeps a test database alive. Dropping it deletes the database file.
pub struct TestDb {
    _dir: TempDir,
    /// Connection URL of the database, for tests that open their own pools.
    pub url: String,
}

/// Create a temporary database with migrations applied.
///
/// Returns `(pool, guard)`. Close the pool before dropping the guard.
pub async fn create_test_db() -> (SqlitePool, TestDb) {
    let dir = tempfile::tempdir().expect("failed to create temp dir for test database");
    let path = dir.path().join("listlaunch_test.db");
    let url = format!("sqlite://{}", path.display());

    let config = DbConfig::new(url.clone());
    let db_pool = pool::create_pool(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to open test database {url}: {e:#}"));

    pool::run_migrations(&db_pool)
        .await
        .expect("migrations should succeed");

    (db_pool, TestDb { _dir: dir, url })
}
