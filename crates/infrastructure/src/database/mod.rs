use ipwatch_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

fn connect_options(cfg: &DatabaseConfig) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(&cfg.url())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs)))
}

/// Pool used for every statement that writes. Reconciles and queue leases
/// run here, so its size bounds write concurrency.
pub async fn create_write_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.write_pool_max_connections)
        .acquire_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .connect_with(connect_options(cfg)?)
        .await?;

    sqlx::query("PRAGMA temp_store = MEMORY")
        .execute(&pool)
        .await?;

    info!(
        path = %cfg.path,
        max_connections = cfg.write_pool_max_connections,
        "Write pool ready"
    );
    Ok(pool)
}

/// Pool for lookups. WAL lets these run alongside the writer.
pub async fn create_read_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.read_pool_max_connections)
        .acquire_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .connect_with(connect_options(cfg)?)
        .await?;

    info!(
        max_connections = cfg.read_pool_max_connections,
        "Read pool ready"
    );
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
