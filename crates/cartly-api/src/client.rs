// Catalog HTTP client
//
// Wraps `reqwest::Client` with environment-aware URL construction and
// status checking. A single call is a single attempt: retrying and
// caching are layered on top by `cartly-core`.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::{Endpoint, Environment};
use crate::error::Error;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the storefront catalog endpoints.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    environment: Environment,
}

impl CatalogClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the host root (e.g. `https://synergism.cc`); the
    /// environment decides which products path is used below it.
    pub fn new(
        base_url: Url,
        environment: Environment,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            environment,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, environment: Environment) -> Self {
        Self {
            http,
            base_url,
            environment,
        }
    }

    /// Build the full URL of an endpoint: `{base}/{path}`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{}", endpoint.path(self.environment));
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Perform one GET against `endpoint` and return the body text.
    ///
    /// Any non-2xx status is reported as [`Error::BadStatus`] so callers
    /// can treat it as a retryable failure instead of decoding it.
    pub async fn fetch_body(&self, endpoint: Endpoint) -> Result<String, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body_preview: preview(&body),
            });
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "received catalog body");
        Ok(body)
    }
}

/// Decode a JSON body, keeping a preview of it in the error message.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
