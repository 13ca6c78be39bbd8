mod complete_job;
mod enqueue_domains;
mod get_queue_stats;

pub use complete_job::CompleteJobUseCase;
pub use enqueue_domains::{EnqueueDomainsUseCase, EnqueueSummary};
pub use get_queue_stats::GetQueueStatsUseCase;
