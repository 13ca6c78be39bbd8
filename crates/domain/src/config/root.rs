use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::discovery::DiscoveryConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;
use super::worker::WorkerConfig;

const LOCAL_CONFIG_PATH: &str = "ipwatch.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ipwatch/config.toml";

/// Main configuration structure for ipwatch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Lookup endpoint binding
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Resolution worker pool
    #[serde(default)]
    pub worker: WorkerConfig,

    /// DNS resolver overrides
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Newly registered domain discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ipwatch.toml in current directory
    /// 3. /etc/ipwatch/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.worker.concurrency = concurrency;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        if self.worker.concurrency == 0 {
            return Err(ConfigError::Validation(
                "Worker concurrency must be at least 1".to_string(),
            ));
        }

        if self.worker.lease_secs == 0 {
            return Err(ConfigError::Validation(
                "Worker lease must be at least 1 second".to_string(),
            ));
        }

        if self.database.write_pool_max_connections == 0
            || self.database.read_pool_max_connections == 0
        {
            return Err(ConfigError::Validation(
                "Database pools need at least one connection".to_string(),
            ));
        }

        if self.discovery.run_at_hour_utc > 23 {
            return Err(ConfigError::Validation(format!(
                "Discovery hour {} is out of range (0-23)",
                self.discovery.run_at_hour_utc
            )));
        }

        if !self.discovery.feed_url.starts_with("http://")
            && !self.discovery.feed_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "Discovery feed URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub concurrency: Option<usize>,
}
