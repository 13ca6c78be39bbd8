use async_trait::async_trait;
use ipwatch_domain::JobResult;

#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// Looks up the A records of `domain`. Every failure mode (NXDOMAIN,
    /// timeout, empty answer, network error) comes back as a failed
    /// `JobResult`; implementations must not retry.
    async fn resolve_ipv4(&self, domain: &str) -> JobResult;
}
