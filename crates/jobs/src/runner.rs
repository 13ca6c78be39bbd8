use crate::{DiscoveryJob, DomainCheckWorker, QueueMaintenanceJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty, $entry:ident) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.$entry().await })
            }
        }
    };
}

// The worker's handle resolves only after in-flight jobs drained, so its
// entry point is `run` rather than the detaching `start`.
impl_spawnable_job!(DomainCheckWorker, run);
impl_spawnable_job!(DiscoveryJob, start);
impl_spawnable_job!(QueueMaintenanceJob, start);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<tokio::task::JoinHandle<()>> {
    job.map(|job| {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job()
    })
}

pub struct JobRunner {
    worker: Option<DomainCheckWorker>,
    discovery: Option<DiscoveryJob>,
    queue_maintenance: Option<QueueMaintenanceJob>,
    shutdown: Option<CancellationToken>,
}

/// Handles of started jobs. Await `wait` after cancelling to let the worker
/// finish what it already leased.
pub struct RunningJobs {
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RunningJobs {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub async fn wait(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            worker: None,
            discovery: None,
            queue_maintenance: None,
            shutdown: None,
        }
    }

    pub fn with_worker(mut self, worker: DomainCheckWorker) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn with_discovery(mut self, job: DiscoveryJob) -> Self {
        self.discovery = Some(job);
        self
    }

    pub fn with_queue_maintenance(mut self, job: QueueMaintenanceJob) -> Self {
        self.queue_maintenance = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) -> RunningJobs {
        info!("Starting background job runner");

        let handles: Vec<_> = [
            spawn_job(self.worker, &self.shutdown),
            spawn_job(self.discovery, &self.shutdown),
            spawn_job(self.queue_maintenance, &self.shutdown),
        ]
        .into_iter()
        .flatten()
        .collect();

        info!(jobs = handles.len(), "All background jobs started");
        RunningJobs { handles }
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
