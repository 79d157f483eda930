//! Async HTTP client for the storefront catalog endpoints.
//!
//! Two resources are served: the product list (coin packs and
//! subscriptions) and the upgrade catalog. [`CatalogClient`] performs one
//! request per call and reports non-success statuses as errors; retrying
//! and caching live in `cartly-core`.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{CatalogClient, decode_body};
pub use endpoint::{DEFAULT_BASE_URL, Endpoint, Environment};
pub use error::Error;
pub use models::{
    PlayerUpgrade, Product, ProductInfo, RegularProduct, SubscriptionProduct, UpgradeTier,
    UpgradesResponse,
};
pub use transport::{TlsMode, TransportConfig};
