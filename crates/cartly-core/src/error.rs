// ── Core error types ──
//
// Errors surfaced by the cache and controller. Transport-layer details
// from `cartly-api` are flattened into strings so the type is `Clone`:
// every waiter on a rejected fetch receives an identical copy.

use thiserror::Error;

use crate::model::Resource;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Attempt-level failures ───────────────────────────────────────
    #[error("Network failure fetching {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    #[error("Unexpected HTTP {status} from {url}")]
    BadStatus { url: String, status: u16 },

    // ── Fetch-level failures ─────────────────────────────────────────
    #[error("Retries exhausted after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<CoreError>,
    },

    #[error("Failed to decode {resource} payload: {message}")]
    Decode { resource: Resource, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The error of the final attempt, unwrapping `RetriesExhausted`.
    pub fn last_attempt(&self) -> &CoreError {
        match self {
            Self::RetriesExhausted { last, .. } => last.last_attempt(),
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cartly_api::Error> for CoreError {
    fn from(err: cartly_api::Error) -> Self {
        match err {
            cartly_api::Error::Transport(ref e) => CoreError::NetworkFailure {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            cartly_api::Error::BadStatus { url, status, .. } => {
                CoreError::BadStatus { url, status }
            }
            cartly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cartly_api::Error::ClientBuild(message) => CoreError::Config { message },
            cartly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
