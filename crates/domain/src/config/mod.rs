//! Configuration module for ipwatch
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP lookup endpoint binding
//! - `database`: SQLite store and pool sizing
//! - `worker`: Resolution worker pool and queue leasing
//! - `resolver`: DNS resolver overrides
//! - `discovery`: Newly registered domain feed
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod database;
pub mod discovery;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;
pub mod worker;

pub use database::DatabaseConfig;
pub use discovery::DiscoveryConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use worker::WorkerConfig;
