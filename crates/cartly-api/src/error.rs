use thiserror::Error;

/// Top-level error type for the `cartly-api` crate.
///
/// Covers every failure mode of a single catalog request: building the
/// client, reaching the host, a non-success status, and decoding the body.
/// `cartly-core` maps these into its own error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed (bad CA file, TLS backend).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Response ────────────────────────────────────────────────────
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {body_preview}")]
    BadStatus {
        url: String,
        status: u16,
        body_preview: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
