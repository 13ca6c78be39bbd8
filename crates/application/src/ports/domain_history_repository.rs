use async_trait::async_trait;
use ipwatch_domain::{DomainError, DomainRecord, JobResult, ReconcileOutcome};

#[async_trait]
pub trait DomainHistoryRepository: Send + Sync {
    /// Merges `result` into the stored record of `domain_name`, creating it
    /// when missing. Must be atomic per domain: concurrent reconciles of the
    /// same name behave as if applied one after another.
    async fn reconcile(
        &self,
        domain_name: &str,
        result: &JobResult,
    ) -> Result<ReconcileOutcome, DomainError>;

    async fn get_domains_by_ip(&self, ip: &str) -> Result<Vec<String>, DomainError>;

    async fn get(&self, domain_name: &str) -> Result<Option<DomainRecord>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
