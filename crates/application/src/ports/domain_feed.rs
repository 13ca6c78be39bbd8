use async_trait::async_trait;
use chrono::NaiveDate;
use ipwatch_domain::DomainError;

/// Source of newly observed domain names.
#[async_trait]
pub trait DomainFeed: Send + Sync {
    /// Raw domain lines published for `date`, unvalidated.
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<String>, DomainError>;
}
