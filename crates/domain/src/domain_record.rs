use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stored resolution history of a single domain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain_name: String,
    pub current_ipv4: Option<String>,
    pub historical_ipv4s: BTreeSet<String>,
    pub last_checked: DateTime<Utc>,
    pub error: Option<String>,
}

impl DomainRecord {
    pub fn new(domain_name: impl Into<String>, last_checked: DateTime<Utc>) -> Self {
        Self {
            domain_name: domain_name.into(),
            current_ipv4: None,
            historical_ipv4s: BTreeSet::new(),
            last_checked,
            error: None,
        }
    }
}
