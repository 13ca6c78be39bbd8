mod domain_feed;
mod domain_history_repository;
mod domain_resolver;
mod job_queue;

pub use domain_feed::DomainFeed;
pub use domain_history_repository::DomainHistoryRepository;
pub use domain_resolver::DomainResolver;
pub use job_queue::JobQueue;
