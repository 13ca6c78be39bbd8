use crate::domain_record::DomainRecord;
use crate::job::JobResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a reconcile did to the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// First sighting of the domain, resolved successfully.
    Created,
    /// Same IP as before; only `last_checked` moved.
    Confirmed,
    /// Current IP replaced. `previous` is `None` when the domain had never
    /// resolved before (only failures were recorded).
    Changed { previous: Option<String> },
    /// Failure stored in `error`; IP state untouched.
    FailureRecorded { created: bool },
}

impl ReconcileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileOutcome::Created => "created",
            ReconcileOutcome::Confirmed => "confirmed",
            ReconcileOutcome::Changed { .. } => "changed",
            ReconcileOutcome::FailureRecorded { .. } => "failure_recorded",
        }
    }
}

impl DomainRecord {
    /// Merges a resolution result into the prior state of `domain_name`.
    ///
    /// This is the reference semantics the stores implement:
    ///   - success with at least one address takes the first one as current,
    ///     pushing the previous current IP into the history set
    ///   - the new current IP is never left in the history set
    ///   - anything else is a failure: `error` and `last_checked` change,
    ///     IP state does not
    ///
    /// A missing record is created on either path.
    pub fn reconcile(
        existing: Option<DomainRecord>,
        domain_name: &str,
        result: &JobResult,
        now: DateTime<Utc>,
    ) -> (DomainRecord, ReconcileOutcome) {
        match result.authoritative_ip() {
            Some(new_ip) => match existing {
                None => {
                    let mut record = DomainRecord::new(domain_name, now);
                    record.current_ipv4 = Some(new_ip.to_string());
                    (record, ReconcileOutcome::Created)
                }
                Some(mut record) => {
                    record.last_checked = now;
                    record.error = None;
                    if record.current_ipv4.as_deref() == Some(new_ip) {
                        return (record, ReconcileOutcome::Confirmed);
                    }
                    let previous = record.current_ipv4.replace(new_ip.to_string());
                    if let Some(prev) = &previous {
                        record.historical_ipv4s.insert(prev.clone());
                    }
                    record.historical_ipv4s.remove(new_ip);
                    (record, ReconcileOutcome::Changed { previous })
                }
            },
            None => {
                let created = existing.is_none();
                let mut record = existing.unwrap_or_else(|| DomainRecord::new(domain_name, now));
                record.last_checked = now;
                record.error = Some(result.error_message().to_string());
                (record, ReconcileOutcome::FailureRecorded { created })
            }
        }
    }
}
