use ipwatch_application::ports::JobQueue;
use ipwatch_application::use_cases::{CompleteJobUseCase, ResolveDomainUseCase};
use ipwatch_domain::{QueuedJob, ReconcileOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Consumes the job queue with at most `concurrency` resolutions in flight.
///
/// Each job is resolved, reconciled into the store and only then removed from
/// the queue. A job whose persistence fails keeps its lease and comes back
/// once the lease expires.
pub struct DomainCheckWorker {
    queue: Arc<dyn JobQueue>,
    resolve: Arc<ResolveDomainUseCase>,
    complete: Arc<CompleteJobUseCase>,
    concurrency: usize,
    poll_interval: Duration,
    lease: Duration,
    shutdown: CancellationToken,
}

impl DomainCheckWorker {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        resolve: Arc<ResolveDomainUseCase>,
        complete: Arc<CompleteJobUseCase>,
    ) -> Self {
        Self {
            queue,
            resolve,
            complete,
            concurrency: 10,
            poll_interval: Duration::from_millis(500),
            lease: Duration::from_secs(300),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_lease(mut self, lease: Duration) -> Self {
        self.lease = lease;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        tokio::spawn(async move { self.run().await });
    }

    /// Runs until the cancellation token fires, then waits for every job
    /// already in flight to finish before returning.
    pub async fn run(self: Arc<Self>) {
        info!(
            concurrency = self.concurrency,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            lease_secs = self.lease.as_secs(),
            "Starting domain check worker"
        );

        let mut in_flight = JoinSet::new();

        while !self.shutdown.is_cancelled() {
            while let Some(joined) = in_flight.try_join_next() {
                if let Err(e) = joined {
                    error!(error = %e, "Domain check task panicked");
                }
            }

            let free = self.concurrency.saturating_sub(in_flight.len());
            if free == 0 {
                tokio::select! {
                    _ = self.shutdown.cancelled() => break,
                    joined = in_flight.join_next() => {
                        if let Some(Err(e)) = joined {
                            error!(error = %e, "Domain check task panicked");
                        }
                    }
                }
                continue;
            }

            match self.queue.reserve(free, self.lease).await {
                Ok(jobs) if jobs.is_empty() => self.idle().await,
                Ok(jobs) => {
                    debug!(count = jobs.len(), in_flight = in_flight.len(), "Jobs leased");
                    for job in jobs {
                        let resolve = Arc::clone(&self.resolve);
                        let complete = Arc::clone(&self.complete);
                        in_flight.spawn(process_job(resolve, complete, job));
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to lease jobs");
                    self.idle().await;
                }
            }
        }

        info!(in_flight = in_flight.len(), "DomainCheckWorker: shutting down");
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Domain check task panicked");
            }
        }
        info!("DomainCheckWorker: stopped");
    }

    async fn idle(&self) {
        tokio::select! {
            _ = self.shutdown.cancelled() => {}
            _ = tokio::time::sleep(self.poll_interval) => {}
        }
    }
}

async fn process_job(
    resolve: Arc<ResolveDomainUseCase>,
    complete: Arc<CompleteJobUseCase>,
    job: QueuedJob,
) {
    if job.attempts > 1 {
        warn!(
            job_id = job.id,
            domain = %job.item.domain,
            attempts = job.attempts,
            "Job redelivered"
        );
    }

    let result = resolve.execute(&job.item.domain).await;

    match complete.execute(&job, &result).await {
        Ok(ReconcileOutcome::Changed { previous }) => info!(
            domain = %job.item.domain,
            previous = previous.as_deref().unwrap_or("-"),
            current = result.authoritative_ip().unwrap_or("-"),
            "Domain IP changed"
        ),
        Ok(outcome) => debug!(
            domain = %job.item.domain,
            outcome = outcome.as_str(),
            "Job completed"
        ),
        Err(e) => error!(
            error = %e,
            job_id = job.id,
            domain = %job.item.domain,
            success = result.success,
            ip = result.authoritative_ip().unwrap_or("-"),
            "Failed to persist resolution; job left for redelivery"
        ),
    }
}
