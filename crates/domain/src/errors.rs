use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Queue error: {0}")]
    QueueError(String),

    #[error("Domain feed error: {0}")]
    FeedError(String),

    #[error("Domain record not found: {0}")]
    DomainRecordNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Persistence and queue failures are transient: the job that hit them
    /// stays queued and is redelivered once its lease expires.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::DatabaseError(_) | DomainError::QueueError(_))
    }
}
