use ipwatch_domain::{DomainError, JobResult, QueuedJob, ReconcileOutcome};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::JobQueue;
use crate::use_cases::ReconcileDomainUseCase;

/// Completion handler of a resolved job: persist first, acknowledge second.
///
/// If reconcile fails the job is left on the queue untouched so the lease
/// expires and it is delivered again. If the acknowledgement itself fails
/// the job is redelivered too, and the second reconcile is a no-op
/// confirmation.
pub struct CompleteJobUseCase {
    reconcile: Arc<ReconcileDomainUseCase>,
    queue: Arc<dyn JobQueue>,
}

impl CompleteJobUseCase {
    pub fn new(reconcile: Arc<ReconcileDomainUseCase>, queue: Arc<dyn JobQueue>) -> Self {
        Self { reconcile, queue }
    }

    #[instrument(skip(self, job, result), fields(job_id = job.id, domain = %job.item.domain))]
    pub async fn execute(
        &self,
        job: &QueuedJob,
        result: &JobResult,
    ) -> Result<ReconcileOutcome, DomainError> {
        let outcome = self.reconcile.execute(&job.item.domain, result).await?;
        self.queue.remove(job.id).await?;
        Ok(outcome)
    }
}
