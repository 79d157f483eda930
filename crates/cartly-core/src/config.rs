// ── Runtime storefront configuration ──
//
// Describes *where* the catalog lives and how hard to try fetching it.
// Core never touches disk: `cartly-config` (or the embedding app) builds
// a `StorefrontConfig` and hands it in.

use std::time::Duration;

use cartly_api::{DEFAULT_BASE_URL, Environment, TlsMode, TransportConfig};
use url::Url;

use crate::retry::RetryPolicy;

/// Configuration for one storefront session.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Host root serving the catalog endpoints.
    pub base_url: Url,
    /// Selects the products path (production or test).
    pub environment: Environment,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy applied to every catalog fetch.
    pub retry: RetryPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            environment: Environment::default(),
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
