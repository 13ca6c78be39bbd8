mod discover_domains;

pub use discover_domains::{DiscoverDomainsUseCase, DiscoveryReport};
