use ipwatch_domain::{DomainError, JobResult, ReconcileOutcome};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::DomainHistoryRepository;

pub struct ReconcileDomainUseCase {
    repo: Arc<dyn DomainHistoryRepository>,
}

impl ReconcileDomainUseCase {
    pub fn new(repo: Arc<dyn DomainHistoryRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, result), fields(success = result.success))]
    pub async fn execute(
        &self,
        domain_name: &str,
        result: &JobResult,
    ) -> Result<ReconcileOutcome, DomainError> {
        let outcome = self.repo.reconcile(domain_name, result).await?;

        if let ReconcileOutcome::Changed {
            previous: Some(previous),
        } = &outcome
        {
            debug!(
                domain = %domain_name,
                previous = %previous,
                current = result.authoritative_ip().unwrap_or_default(),
                "Domain moved to a new IP"
            );
        }

        Ok(outcome)
    }
}
