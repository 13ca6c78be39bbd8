use super::Repositories;
use ipwatch_application::use_cases::*;
use std::sync::Arc;

pub struct UseCases {
    pub resolve: Arc<ResolveDomainUseCase>,
    pub complete_job: Arc<CompleteJobUseCase>,
    pub get_domains_by_ip: Arc<GetDomainsByIpUseCase>,
    pub get_domain_record: Arc<GetDomainRecordUseCase>,
    pub get_queue_stats: Arc<GetQueueStatsUseCase>,
    pub enqueue: Arc<EnqueueDomainsUseCase>,
    pub discover: Arc<DiscoverDomainsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories) -> Self {
        let reconcile = Arc::new(ReconcileDomainUseCase::new(repos.domain_history.clone()));
        let enqueue = Arc::new(EnqueueDomainsUseCase::new(repos.job_queue.clone()));

        Self {
            resolve: Arc::new(ResolveDomainUseCase::new(repos.resolver.clone())),
            complete_job: Arc::new(CompleteJobUseCase::new(
                reconcile,
                repos.job_queue.clone(),
            )),
            get_domains_by_ip: Arc::new(GetDomainsByIpUseCase::new(
                repos.domain_history.clone(),
            )),
            get_domain_record: Arc::new(GetDomainRecordUseCase::new(
                repos.domain_history.clone(),
            )),
            get_queue_stats: Arc::new(GetQueueStatsUseCase::new(repos.job_queue.clone())),
            discover: Arc::new(DiscoverDomainsUseCase::new(
                repos.feed.clone(),
                enqueue.clone(),
                repos.job_queue.clone(),
            )),
            enqueue,
        }
    }
}
