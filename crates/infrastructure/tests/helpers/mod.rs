#![allow(dead_code)]

use ipwatch_domain::config::DatabaseConfig;
use ipwatch_infrastructure::database::{create_read_pool, create_write_pool, run_migrations};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Single-connection in-memory database with the full schema applied.
/// One connection keeps every query on the same in-memory database.
pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// On-disk database for tests that need several real connections.
pub struct FileDb {
    pub write_pool: SqlitePool,
    pub read_pool: SqlitePool,
    _dir: TempDir,
}

pub async fn create_file_db(write_connections: u32) -> FileDb {
    let dir = tempfile::tempdir().unwrap();
    let cfg = DatabaseConfig {
        path: dir.path().join("ipwatch.db").display().to_string(),
        write_pool_max_connections: write_connections,
        read_pool_max_connections: 4,
        busy_timeout_secs: 30,
    };
    let write_pool = create_write_pool(&cfg).await.unwrap();
    run_migrations(&write_pool).await.unwrap();
    let read_pool = create_read_pool(&cfg).await.unwrap();
    FileDb {
        write_pool,
        read_pool,
        _dir: dir,
    }
}
