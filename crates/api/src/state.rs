use ipwatch_application::use_cases::{
    GetDomainRecordUseCase, GetDomainsByIpUseCase, GetQueueStatsUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_domains_by_ip: Arc<GetDomainsByIpUseCase>,
    pub get_domain_record: Arc<GetDomainRecordUseCase>,
    pub get_queue_stats: Arc<GetQueueStatsUseCase>,
}
