pub mod domain;
pub mod health;
pub mod lookup;
pub mod queue;

pub use domain::DomainRecordResponse;
pub use health::HealthResponse;
pub use lookup::{LookupQuery, LookupResponse};
pub use queue::QueueStatsResponse;
