pub mod discovery;
pub mod domains;
pub mod queue;

pub use discovery::{DiscoverDomainsUseCase, DiscoveryReport};
pub use domains::{
    GetDomainRecordUseCase, GetDomainsByIpUseCase, ReconcileDomainUseCase, ResolveDomainUseCase,
};
pub use queue::{CompleteJobUseCase, EnqueueDomainsUseCase, EnqueueSummary, GetQueueStatsUseCase};
