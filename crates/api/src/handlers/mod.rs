pub mod domains;
pub mod health;
pub mod lookup;
pub mod queue;

pub use domains::get_domain_record;
pub use health::health_check;
pub use lookup::{lookup_domains_by_ip, lookup_without_ip};
pub use queue::get_queue_stats;
