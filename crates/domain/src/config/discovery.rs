use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the newly registered domains archive. The archive name
    /// (`YYYY-MM-DD.zip`, base64 encoded) and `/nrd` are appended.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default = "default_run_at_hour_utc")]
    pub run_at_hour_utc: u32,

    /// Keep a copy of every downloaded archive in this directory.
    #[serde(default)]
    pub archive_dir: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            feed_url: default_feed_url(),
            run_at_hour_utc: default_run_at_hour_utc(),
            archive_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_feed_url() -> String {
    "https://www.whoisds.com/whois-database/newly-registered-domains".to_string()
}

fn default_run_at_hour_utc() -> u32 {
    16
}

fn default_request_timeout_secs() -> u64 {
    120
}
