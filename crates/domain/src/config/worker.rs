use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of domains being resolved at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Sleep between queue polls when the queue came back empty.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// How long a leased job stays invisible before it is redelivered.
    #[serde(default = "default_lease_secs")]
    pub lease_secs: u64,

    /// Interval of the queue depth report; 0 turns it off.
    #[serde(default = "default_stats_interval_secs")]
    pub stats_interval_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrency: default_concurrency(),
            poll_interval_ms: default_poll_interval_ms(),
            lease_secs: default_lease_secs(),
            stats_interval_secs: default_stats_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    10
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_lease_secs() -> u64 {
    300
}

fn default_stats_interval_secs() -> u64 {
    60
}
