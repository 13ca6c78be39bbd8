use async_trait::async_trait;
use ipwatch_domain::{DomainError, JobItem, QueueStats, QueuedJob};
use std::time::Duration;

/// Durable at-least-once work queue.
///
/// A reserved job stays invisible for `lease`; if it is not removed in that
/// window it becomes available again and will be handed out a second time.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, item: JobItem) -> Result<i64, DomainError>;

    async fn enqueue_batch(&self, items: Vec<JobItem>) -> Result<u64, DomainError>;

    async fn reserve(&self, limit: usize, lease: Duration) -> Result<Vec<QueuedJob>, DomainError>;

    /// Acknowledges a job. Only call once its effects are persisted.
    async fn remove(&self, job_id: i64) -> Result<(), DomainError>;

    async fn stats(&self) -> Result<QueueStats, DomainError>;
}
