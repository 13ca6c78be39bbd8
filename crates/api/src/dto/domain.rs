use ipwatch_domain::DomainRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DomainRecordResponse {
    pub domain_name: String,
    pub current_ipv4: Option<String>,
    pub historical_ipv4s: Vec<String>,
    pub last_checked: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DomainRecord> for DomainRecordResponse {
    fn from(record: DomainRecord) -> Self {
        Self {
            domain_name: record.domain_name,
            current_ipv4: record.current_ipv4,
            historical_ipv4s: record.historical_ipv4s.into_iter().collect(),
            last_checked: record.last_checked.to_rfc3339(),
            error: record.error,
        }
    }
}
