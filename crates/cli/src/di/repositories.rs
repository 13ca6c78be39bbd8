use ipwatch_domain::{Config, DomainError};
use ipwatch_infrastructure::{
    dns::HickoryDomainResolver, feed::NrdArchiveFeed, queue::SqliteJobQueue,
    repositories::SqliteDomainHistoryRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub domain_history: Arc<SqliteDomainHistoryRepository>,
    pub job_queue: Arc<SqliteJobQueue>,
    pub resolver: Arc<HickoryDomainResolver>,
    pub feed: Arc<NrdArchiveFeed>,
}

impl Repositories {
    pub fn new(
        write_pool: SqlitePool,
        read_pool: SqlitePool,
        config: &Config,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            domain_history: Arc::new(SqliteDomainHistoryRepository::new(
                write_pool.clone(),
                read_pool,
            )),
            job_queue: Arc::new(SqliteJobQueue::new(write_pool)),
            resolver: Arc::new(HickoryDomainResolver::from_system_config(&config.resolver)?),
            feed: Arc::new(NrdArchiveFeed::new(&config.discovery)?),
        })
    }
}
