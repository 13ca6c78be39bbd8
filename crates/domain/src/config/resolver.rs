use serde::{Deserialize, Serialize};

/// Overrides applied on top of the system resolver configuration. Unset
/// fields keep whatever `/etc/resolv.conf` (or the platform default) says.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub attempts: Option<usize>,
}
