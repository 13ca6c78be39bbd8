use ipwatch_domain::{validators::normalize_domain_name, DomainError, DomainRecord};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::DomainHistoryRepository;

pub struct GetDomainRecordUseCase {
    repo: Arc<dyn DomainHistoryRepository>,
}

impl GetDomainRecordUseCase {
    pub fn new(repo: Arc<dyn DomainHistoryRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain_name: &str) -> Result<DomainRecord, DomainError> {
        let name = normalize_domain_name(domain_name)
            .ok_or_else(|| DomainError::InvalidDomainName("Domain cannot be empty".to_string()))?;

        self.repo
            .get(&name)
            .await?
            .ok_or(DomainError::DomainRecordNotFound(name))
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.repo.count().await
    }
}
