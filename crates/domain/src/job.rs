use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A domain waiting to be checked, as produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobItem {
    pub domain: String,
    pub date: String,
}

impl JobItem {
    pub fn new(domain: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            date: date.into(),
        }
    }

    pub fn dated(domain: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(domain, date.format("%Y-%m-%d").to_string())
    }
}

/// Outcome of one resolution attempt. Resolution failures travel as data in
/// this shape and never as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobResult {
    pub fn resolved(addresses: Vec<String>) -> Self {
        Self {
            success: true,
            result: Some(addresses),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// First resolved address, the only one that counts as the domain's
    /// current IP. `None` for failures and for successes with an empty list.
    pub fn authoritative_ip(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.result
            .as_ref()
            .and_then(|addresses| addresses.first())
            .map(String::as_str)
    }

    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or(UNKNOWN_ERROR)
    }
}

/// A leased queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedJob {
    pub id: i64,
    pub item: JobItem,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: u64,
    pub leased: u64,
}

impl QueueStats {
    pub fn total(&self) -> u64 {
        self.pending + self.leased
    }
}
