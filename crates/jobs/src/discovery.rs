use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use ipwatch_application::use_cases::DiscoverDomainsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs discovery once a day at `run_at_hour_utc`, pulling the feed of the
/// previous UTC day.
pub struct DiscoveryJob {
    discover: Arc<DiscoverDomainsUseCase>,
    run_at_hour_utc: u32,
    shutdown: CancellationToken,
}

impl DiscoveryJob {
    pub fn new(discover: Arc<DiscoverDomainsUseCase>, run_at_hour_utc: u32) -> Self {
        Self {
            discover,
            run_at_hour_utc: run_at_hour_utc.min(23),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            run_at_hour_utc = self.run_at_hour_utc,
            "Starting discovery job"
        );

        tokio::spawn(async move {
            loop {
                let wait = until_next_run(Utc::now(), self.run_at_hour_utc);
                info!(wait_secs = wait.as_secs(), "Next discovery scheduled");

                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("DiscoveryJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(wait) => {
                        self.run_for(feed_date(Utc::now().date_naive())).await;
                    }
                }
            }
        });
    }

    pub async fn run_for(&self, date: NaiveDate) {
        match self.discover.execute(date).await {
            Ok(report) => info!(
                %date,
                fetched = report.fetched,
                enqueued = report.summary.enqueued,
                queue_length = report.queue_length,
                "Discovery run completed"
            ),
            Err(e) => error!(error = %e, %date, "Discovery run failed"),
        }
    }
}

/// The feed for day D is published during D+1.
pub fn feed_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Time left until the next `hour:00:00` UTC strictly after `now`.
pub fn until_next_run(now: DateTime<Utc>, hour: u32) -> Duration {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date_naive().and_time(at).and_utc();
    if next <= now {
        next += TimeDelta::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
