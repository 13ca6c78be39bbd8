use ipwatch_domain::config::DatabaseConfig;
use ipwatch_infrastructure::database::{create_read_pool, create_write_pool, run_migrations};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Opens both pools and brings the schema up to date. The read pool is only
/// opened after migrations so it never sees a missing table.
pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<(SqlitePool, SqlitePool)> {
    info!("Initializing database: {}", cfg.url());

    let write_pool = create_write_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize write pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    run_migrations(&write_pool).await.map_err(|e| {
        error!("Failed to run migrations: {}", e);
        anyhow::anyhow!(e)
    })?;

    let read_pool = create_read_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize read pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Database initialized successfully (write_pool max={}, read_pool max={})",
        cfg.write_pool_max_connections, cfg.read_pool_max_connections,
    );

    Ok((write_pool, read_pool))
}
