pub mod domain_history_repository;

pub use domain_history_repository::SqliteDomainHistoryRepository;
