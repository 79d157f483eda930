// ── Storefront context ──
//
// The single session-wide object owning the catalog cache and the subtab
// controller. Create one per session and share clones of it; nothing in
// this crate keeps ambient global state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cartly_api::CatalogClient;
use tokio::runtime::Handle;
use tracing::info;

use crate::config::StorefrontConfig;
use crate::error::CoreError;
use crate::model::{Resource, Subtab};
use crate::store::CatalogCache;
use crate::subtab::SubtabController;
use crate::view::SubtabView;

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<StorefrontInner>`; lives for the whole
/// session.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    cache: CatalogCache,
    subtabs: SubtabController,
    initialized: AtomicBool,
}

impl Storefront {
    /// Build the HTTP client from `config` and wire up cache + controller
    /// on the current tokio runtime.
    pub fn new(config: &StorefrontConfig, view: Arc<dyn SubtabView>) -> Result<Self, CoreError> {
        let client = CatalogClient::new(
            config.base_url.clone(),
            config.environment,
            &config.transport(),
        )?;
        Self::with_client(client, config, view)
    }

    /// Wire up a storefront around an existing client on the current
    /// tokio runtime.
    pub fn with_client(
        client: CatalogClient,
        config: &StorefrontConfig,
        view: Arc<dyn SubtabView>,
    ) -> Result<Self, CoreError> {
        let cache = CatalogCache::new(client, config.retry)?;
        Ok(Self::assemble(cache, view))
    }

    /// Wire up a storefront whose background work runs on `runtime`.
    ///
    /// For hosts that build the storefront on a thread outside the runtime,
    /// such as a UI main thread.
    pub fn with_runtime(
        client: CatalogClient,
        config: &StorefrontConfig,
        view: Arc<dyn SubtabView>,
        runtime: Handle,
    ) -> Self {
        Self::assemble(CatalogCache::with_runtime(client, config.retry, runtime), view)
    }

    fn assemble(cache: CatalogCache, view: Arc<dyn SubtabView>) -> Self {
        let subtabs = SubtabController::new(cache.clone(), view);
        Self {
            inner: Arc::new(StorefrontInner {
                cache,
                subtabs,
                initialized: AtomicBool::new(false),
            }),
        }
    }

    /// Open the storefront tab.
    ///
    /// The first call prefetches products and selects Coins. Later calls
    /// re-run the transition for whichever subtab is active.
    pub fn initialize(&self) {
        if self.inner.initialized.swap(true, Ordering::AcqRel) {
            self.inner.subtabs.select(self.inner.subtabs.active());
            return;
        }

        info!("initializing storefront");
        self.inner.cache.fetch(Resource::Products);
        self.inner.subtabs.select(Subtab::Coins);
    }

    /// Fire-and-forget selection entry point for button handlers. Safe to
    /// call from threads outside the runtime.
    pub fn select_subtab(&self, index: usize) {
        self.inner.subtabs.select_index(index);
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.inner.cache
    }

    pub fn subtabs(&self) -> &SubtabController {
        &self.inner.subtabs
    }
}
