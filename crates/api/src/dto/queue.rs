use ipwatch_domain::QueueStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QueueStatsResponse {
    pub pending: u64,
    pub leased: u64,
    pub total: u64,
}

impl From<QueueStats> for QueueStatsResponse {
    fn from(stats: QueueStats) -> Self {
        Self {
            pending: stats.pending,
            leased: stats.leased,
            total: stats.total(),
        }
    }
}
