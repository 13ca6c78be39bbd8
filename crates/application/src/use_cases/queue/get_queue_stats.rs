use ipwatch_domain::{DomainError, QueueStats};
use std::sync::Arc;

use crate::ports::JobQueue;

pub struct GetQueueStatsUseCase {
    queue: Arc<dyn JobQueue>,
}

impl GetQueueStatsUseCase {
    pub fn new(queue: Arc<dyn JobQueue>) -> Self {
        Self { queue }
    }

    pub async fn execute(&self) -> Result<QueueStats, DomainError> {
        self.queue.stats().await
    }
}
