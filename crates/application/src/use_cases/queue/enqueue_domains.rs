use chrono::NaiveDate;
use ipwatch_domain::{
    validators::{normalize_domain_name, validate_domain_name},
    DomainError, JobItem,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::ports::JobQueue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnqueueSummary {
    pub enqueued: u64,
    pub duplicates: u64,
    pub rejected: u64,
}

pub struct EnqueueDomainsUseCase {
    queue: Arc<dyn JobQueue>,
}

impl EnqueueDomainsUseCase {
    pub fn new(queue: Arc<dyn JobQueue>) -> Self {
        Self { queue }
    }

    /// Normalizes, validates and enqueues `domains` stamped with `date`.
    /// Blank lines are skipped silently; invalid names and repeats within
    /// the batch are counted but not enqueued.
    #[instrument(skip(self, domains), fields(count = domains.len()))]
    pub async fn execute(
        &self,
        domains: Vec<String>,
        date: NaiveDate,
    ) -> Result<EnqueueSummary, DomainError> {
        let mut summary = EnqueueSummary::default();
        let mut seen = HashSet::with_capacity(domains.len());
        let mut items = Vec::with_capacity(domains.len());

        for raw in domains {
            let Some(domain) = normalize_domain_name(&raw) else {
                continue;
            };
            if let Err(reason) = validate_domain_name(&domain) {
                debug!(domain = %domain, reason = %reason, "Skipping invalid domain");
                summary.rejected += 1;
                continue;
            }
            if !seen.insert(domain.clone()) {
                summary.duplicates += 1;
                continue;
            }
            items.push(JobItem::dated(domain, date));
        }

        if !items.is_empty() {
            summary.enqueued = self.queue.enqueue_batch(items).await?;
        }

        info!(
            enqueued = summary.enqueued,
            duplicates = summary.duplicates,
            rejected = summary.rejected,
            "Domains enqueued"
        );

        Ok(summary)
    }
}
