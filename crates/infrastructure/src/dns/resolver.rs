use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use ipwatch_application::ports::DomainResolver;
use ipwatch_domain::config::ResolverConfig;
use ipwatch_domain::{DomainError, JobResult};
use std::time::Duration;
use tracing::{debug, info};

/// A-record lookups through the system's configured nameservers.
pub struct HickoryDomainResolver {
    resolver: TokioResolver,
}

impl HickoryDomainResolver {
    /// Builds from `/etc/resolv.conf` (or the platform equivalent) and applies
    /// the optional overrides in `cfg`.
    pub fn from_system_config(cfg: &ResolverConfig) -> Result<Self, DomainError> {
        let mut builder = TokioResolver::builder_tokio().map_err(|e| {
            DomainError::ConfigError(format!("Failed to read system resolver config: {}", e))
        })?;

        // Every check must see the live answer, not a cached one.
        let opts = builder.options_mut();
        opts.cache_size = 0;
        if let Some(secs) = cfg.timeout_secs {
            opts.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = cfg.attempts {
            opts.attempts = attempts;
        }

        info!(
            timeout_secs = cfg.timeout_secs,
            attempts = cfg.attempts,
            "DNS resolver initialized from system configuration"
        );

        Ok(Self::new(builder.build()))
    }

    pub fn new(resolver: TokioResolver) -> Self {
        Self { resolver }
    }
}

/// Appends the root label so search domains never apply.
fn fully_qualified(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{}.", domain)
    }
}

#[async_trait]
impl DomainResolver for HickoryDomainResolver {
    async fn resolve_ipv4(&self, domain: &str) -> JobResult {
        match self.resolver.ipv4_lookup(fully_qualified(domain)).await {
            Ok(lookup) => {
                let addresses: Vec<String> = lookup.iter().map(|a| a.0.to_string()).collect();
                if addresses.is_empty() {
                    return JobResult::failed(format!("No IPv4 addresses found for {}", domain));
                }
                JobResult::resolved(addresses)
            }
            Err(e) if e.is_no_records_found() => {
                debug!(domain = %domain, error = %e, "No A records");
                JobResult::failed(format!("No IPv4 addresses found for {}: {}", domain, e))
            }
            Err(e) => {
                debug!(domain = %domain, error = %e, "A lookup failed");
                JobResult::failed(e.to_string())
            }
        }
    }
}
