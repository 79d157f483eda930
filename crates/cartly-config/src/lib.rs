//! Storefront configuration loading.
//!
//! A TOML file plus `CARTLY_`-prefixed environment variables, merged with
//! figment and translated into a `cartly_core::StorefrontConfig`. Nested
//! keys use a double underscore in the environment, e.g.
//! `CARTLY_RETRY__MAX_ATTEMPTS=3`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cartly_core::{Backoff, Environment, RetryPolicy, StorefrontConfig, TlsMode};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// `production` or `test`; selects the products endpoint.
    #[serde(default)]
    pub environment: Environment,

    /// Host root serving the catalog.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Extra CA certificate (PEM) to trust.
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub retry: RetrySection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: default_base_url(),
            timeout: default_timeout(),
            ca_cert: None,
            retry: RetrySection::default(),
        }
    }
}

fn default_base_url() -> String {
    cartly_core::DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

/// `[retry]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetrySection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default)]
    pub backoff: BackoffKind,

    /// Fixed delay, or the exponential base, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Exponential cap in milliseconds. Ignored for fixed backoff.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff: BackoffKind::default(),
            delay_ms: default_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}
fn default_delay_ms() -> u64 {
    1_000
}
fn default_max_delay_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    Fixed,
    #[default]
    Exponential,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("cc", "synergism", "cartly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cartly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an
/// error; defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CARTLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and translate into the runtime config consumed by core.
    pub fn to_storefront_config(&self) -> Result<StorefrontConfig, ConfigError> {
        let base_url: url::Url =
            self.base_url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::Validation {
                    field: "base_url".into(),
                    reason: format!("invalid URL '{}': {e}", self.base_url),
                })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = self
            .ca_cert
            .as_ref()
            .map_or(TlsMode::System, |path| TlsMode::CustomCa(path.clone()));

        Ok(StorefrontConfig {
            base_url,
            environment: self.environment,
            tls,
            timeout: Duration::from_secs(self.timeout),
            retry: self.retry.to_policy()?,
        })
    }
}

impl RetrySection {
    fn to_policy(&self) -> Result<RetryPolicy, ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "retry.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }

        let delay = Duration::from_millis(self.delay_ms);
        let backoff = match self.backoff {
            BackoffKind::Fixed => Backoff::Fixed(delay),
            BackoffKind::Exponential => {
                if self.max_delay_ms < self.delay_ms {
                    return Err(ConfigError::Validation {
                        field: "retry.max_delay_ms".into(),
                        reason: format!(
                            "cap {}ms is below the base delay {}ms",
                            self.max_delay_ms, self.delay_ms
                        ),
                    });
                }
                Backoff::Exponential {
                    base: delay,
                    cap: Duration::from_millis(self.max_delay_ms),
                }
            }
        };

        Ok(RetryPolicy::new(self.max_attempts, backoff))
    }
}
