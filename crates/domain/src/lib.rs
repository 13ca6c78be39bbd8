//! ipwatch Domain Layer
pub mod config;
pub mod domain_record;
pub mod errors;
pub mod job;
pub mod reconcile;
pub mod validators;

pub use config::{CliOverrides, Config, ConfigError};
pub use domain_record::DomainRecord;
pub use errors::DomainError;
pub use job::{JobItem, JobResult, QueueStats, QueuedJob, UNKNOWN_ERROR};
pub use reconcile::ReconcileOutcome;
