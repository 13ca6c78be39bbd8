use ipwatch_application::use_cases::GetQueueStatsUseCase;
use ipwatch_domain::QueueStats;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodically reports the queue depth.
pub struct QueueMaintenanceJob {
    stats: Arc<GetQueueStatsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl QueueMaintenanceJob {
    pub fn new(stats: Arc<GetQueueStatsUseCase>) -> Self {
        Self {
            stats,
            interval_secs: 60,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting queue maintenance job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("QueueMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.report().await;
                    }
                }
            }
        });
    }

    pub async fn report(&self) -> Option<QueueStats> {
        match self.stats.execute().await {
            Ok(stats) => {
                info!(
                    pending = stats.pending,
                    leased = stats.leased,
                    total = stats.total(),
                    "Queue depth"
                );
                Some(stats)
            }
            Err(e) => {
                error!(error = %e, "Failed to read queue stats");
                None
            }
        }
    }
}
