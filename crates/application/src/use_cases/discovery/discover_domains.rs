use chrono::NaiveDate;
use ipwatch_domain::DomainError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::{DomainFeed, JobQueue};
use crate::use_cases::{EnqueueDomainsUseCase, EnqueueSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub fetched: u64,
    pub summary: EnqueueSummary,
    pub queue_length: u64,
}

pub struct DiscoverDomainsUseCase {
    feed: Arc<dyn DomainFeed>,
    enqueue: Arc<EnqueueDomainsUseCase>,
    queue: Arc<dyn JobQueue>,
}

impl DiscoverDomainsUseCase {
    pub fn new(
        feed: Arc<dyn DomainFeed>,
        enqueue: Arc<EnqueueDomainsUseCase>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            feed,
            enqueue,
            queue,
        }
    }

    /// Pulls the feed published for `date` and pushes every domain in it onto
    /// the queue, each stamped with that date.
    #[instrument(skip(self))]
    pub async fn execute(&self, date: NaiveDate) -> Result<DiscoveryReport, DomainError> {
        let domains = self.feed.fetch(date).await?;
        let fetched = domains.len() as u64;
        info!(fetched, %date, "Domains extracted from feed");

        let summary = self.enqueue.execute(domains, date).await?;
        let queue_length = self.queue.stats().await?.total();

        info!(
            enqueued = summary.enqueued,
            queue_length,
            "Discovery finished"
        );

        Ok(DiscoveryReport {
            fetched,
            summary,
            queue_length,
        })
    }
}
