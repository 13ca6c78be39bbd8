use ipwatch_domain::{validators::parse_ipv4, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::DomainHistoryRepository;

pub struct GetDomainsByIpUseCase {
    repo: Arc<dyn DomainHistoryRepository>,
}

impl GetDomainsByIpUseCase {
    pub fn new(repo: Arc<dyn DomainHistoryRepository>) -> Self {
        Self { repo }
    }

    /// Domains whose current IPv4 is `ip`. Malformed input is rejected
    /// before the store is touched.
    #[instrument(skip(self))]
    pub async fn execute(&self, ip: &str) -> Result<Vec<String>, DomainError> {
        let addr = parse_ipv4(ip).map_err(DomainError::InvalidIpAddress)?;
        self.repo.get_domains_by_ip(&addr.to_string()).await
    }
}
