//! Catalog caching and subtab selection for the storefront.
//!
//! - **[`Storefront`]** — Session-wide context object owning the cache and
//!   the subtab controller. [`initialize()`](Storefront::initialize)
//!   prefetches products and opens the Coins subtab;
//!   [`select_subtab()`](Storefront::select_subtab) is the fire-and-forget
//!   entry point for button handlers.
//!
//! - **[`CatalogCache`]** — Single-flight cache keyed by [`Resource`]. The
//!   first request for a resource spawns one retrieval; every caller
//!   shares its [`Deferred`] outcome for the rest of the process.
//!
//! - **[`RetryPolicy`]** — Bounded sequential retries with fixed or
//!   capped-exponential [`Backoff`].
//!
//! - **[`SubtabController`]** — Selection state machine. Shows a subtab
//!   once its data is cached, unless the selection has moved on by then.
//!
//! - **[`SubtabView`]** — The rendering collaborator the controller drives.

pub mod config;
pub mod convert;
pub mod deferred;
pub mod error;
pub mod model;
pub mod retry;
pub mod store;
pub mod storefront;
pub mod subtab;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::StorefrontConfig;
pub use deferred::{Deferred, Resolver};
pub use error::CoreError;
pub use retry::{Backoff, RetryPolicy};
pub use store::{CatalogCache, CatalogDeferred};
pub use storefront::Storefront;
pub use subtab::SubtabController;
pub use view::SubtabView;

pub use cartly_api::{DEFAULT_BASE_URL, Environment, TlsMode};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CatalogData, PlayerUpgrade, Product, ProductCatalog, ProductInfo, RegularProduct, Resource,
    Subtab, SubscriptionProduct, UpgradeTier, UpgradesResponse,
};
