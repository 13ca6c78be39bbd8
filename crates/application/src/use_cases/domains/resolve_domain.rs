use ipwatch_domain::JobResult;
use std::sync::Arc;
use tracing::debug;

use crate::ports::DomainResolver;

pub struct ResolveDomainUseCase {
    resolver: Arc<dyn DomainResolver>,
}

impl ResolveDomainUseCase {
    pub fn new(resolver: Arc<dyn DomainResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, domain: &str) -> JobResult {
        let result = self.resolver.resolve_ipv4(domain).await;

        match result.authoritative_ip() {
            Some(ip) => debug!(
                domain = %domain,
                ip = %ip,
                answers = result.result.as_ref().map_or(0, Vec::len),
                "Domain resolved"
            ),
            None => debug!(domain = %domain, error = %result.error_message(), "Domain resolution failed"),
        }

        result
    }
}
