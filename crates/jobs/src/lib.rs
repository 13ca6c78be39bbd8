pub mod discovery;
pub mod domain_check_worker;
pub mod queue_maintenance;
pub mod runner;

pub use discovery::DiscoveryJob;
pub use domain_check_worker::DomainCheckWorker;
pub use queue_maintenance::QueueMaintenanceJob;
pub use runner::{JobRunner, RunningJobs};
