mod get_domain_record;
mod get_domains_by_ip;
mod reconcile_domain;
mod resolve_domain;

pub use get_domain_record::GetDomainRecordUseCase;
pub use get_domains_by_ip::GetDomainsByIpUseCase;
pub use reconcile_domain::ReconcileDomainUseCase;
pub use resolve_domain::ResolveDomainUseCase;
