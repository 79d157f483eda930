// ── Single-flight catalog cache ──
//
// One `Deferred` per resource, created by the first request and kept for
// the rest of the process. `DashMap`'s entry API makes the
// check-then-insert atomic, so concurrent first callers still launch
// exactly one retrieval.

use std::sync::Arc;

use cartly_api::{CatalogClient, Endpoint, Product, UpgradesResponse, decode_body};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::convert::seed_player_upgrades;
use crate::deferred::{Deferred, Resolver};
use crate::error::CoreError;
use crate::model::{CatalogData, ProductCatalog, Resource};
use crate::retry::RetryPolicy;

/// The shared outcome of one resource's retrieval.
pub type CatalogDeferred = Deferred<CatalogData, CoreError>;

/// Single-flight cache for the products and upgrades resources.
///
/// Cheaply cloneable via `Arc`. There is no eviction or refresh: the first
/// retrieval's outcome, success or failure, is what every caller sees for
/// the lifetime of the cache.
///
/// Retrievals run on the runtime captured at construction, so `fetch` may
/// be called from any thread, including UI threads outside the runtime.
#[derive(Clone)]
pub struct CatalogCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    client: CatalogClient,
    retry: RetryPolicy,
    runtime: Handle,
    entries: DashMap<Resource, CatalogDeferred>,
}

impl CatalogCache {
    /// Build a cache bound to the current tokio runtime.
    ///
    /// Fails with [`CoreError::Config`] when called outside a runtime.
    pub fn new(client: CatalogClient, retry: RetryPolicy) -> Result<Self, CoreError> {
        let runtime = Handle::try_current().map_err(|e| CoreError::Config {
            message: format!("catalog cache needs a tokio runtime: {e}"),
        })?;
        Ok(Self::with_runtime(client, retry, runtime))
    }

    /// Build a cache that spawns its retrievals on `runtime`.
    pub fn with_runtime(client: CatalogClient, retry: RetryPolicy, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                client,
                retry,
                runtime,
                entries: DashMap::new(),
            }),
        }
    }

    /// Return the deferred outcome for `resource`, launching the retrieval
    /// on first use.
    ///
    /// The retrieval runs on a spawned task so it completes even if every
    /// caller stops waiting. If that task ends without settling, the
    /// deferred is rejected with [`CoreError::Internal`].
    pub fn fetch(&self, resource: Resource) -> CatalogDeferred {
        match self.inner.entries.entry(resource) {
            Entry::Occupied(entry) => {
                debug!(%resource, settled = entry.get().is_settled(), "catalog cache hit");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let (resolver, deferred) = Deferred::pending_or_reject(abandoned);
                entry.insert(deferred.clone());
                self.launch(resource, resolver);
                deferred
            }
        }
    }

    /// Wait for the products resource.
    pub async fn products(&self) -> Result<Arc<ProductCatalog>, CoreError> {
        let data = self.fetch(Resource::Products).wait().await?;
        data.as_products().cloned().ok_or_else(|| mismatch(Resource::Products, &data))
    }

    /// Wait for the upgrades resource.
    pub async fn upgrades(&self) -> Result<Arc<UpgradesResponse>, CoreError> {
        let data = self.fetch(Resource::Upgrades).wait().await?;
        data.as_upgrades().cloned().ok_or_else(|| mismatch(Resource::Upgrades, &data))
    }

    /// The products resource if it has already been fulfilled.
    pub fn products_snapshot(&self) -> Option<Arc<ProductCatalog>> {
        self.settled_data(Resource::Products)?.as_products().cloned()
    }

    /// The upgrades resource if it has already been fulfilled.
    pub fn upgrades_snapshot(&self) -> Option<Arc<UpgradesResponse>> {
        self.settled_data(Resource::Upgrades)?.as_upgrades().cloned()
    }

    /// Whether a retrieval has ever been launched for `resource`.
    pub fn is_requested(&self, resource: Resource) -> bool {
        self.inner.entries.contains_key(&resource)
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Runtime that retrievals and display tasks are spawned on.
    pub(crate) fn runtime(&self) -> &Handle {
        &self.inner.runtime
    }

    fn settled_data(&self, resource: Resource) -> Option<CatalogData> {
        let deferred = self.inner.entries.get(&resource)?.clone();
        deferred.peek()?.ok()
    }

    fn launch(&self, resource: Resource, resolver: Resolver<CatalogData, CoreError>) {
        let client = self.inner.client.clone();
        let retry = self.inner.retry;

        info!(%resource, "starting catalog fetch");
        self.inner.runtime.spawn(async move {
            match retrieve(&client, retry, resource).await {
                Ok(data) => {
                    info!(%resource, "catalog fetch fulfilled");
                    resolver.resolve(data);
                }
                Err(e) => {
                    warn!(%resource, error = %e, "catalog fetch rejected");
                    resolver.reject(e);
                }
            }
        });
    }
}

/// Fetch with retries, then decode and post-process exactly once.
///
/// Only the HTTP attempt is retried. A body that fails to decode would
/// fail again, so it rejects immediately.
async fn retrieve(
    client: &CatalogClient,
    retry: RetryPolicy,
    resource: Resource,
) -> Result<CatalogData, CoreError> {
    let endpoint = Endpoint::from(resource);
    let body = retry
        .execute(|| async move { client.fetch_body(endpoint).await.map_err(CoreError::from) })
        .await?;

    let decode_error = |e: cartly_api::Error| CoreError::Decode {
        resource,
        message: e.to_string(),
    };

    match resource {
        Resource::Products => {
            let products: Vec<Product> = decode_body(&body).map_err(decode_error)?;
            debug!(count = products.len(), "decoded products");
            Ok(CatalogData::Products(Arc::new(ProductCatalog::from_products(
                products,
            ))))
        }
        Resource::Upgrades => {
            let mut upgrades: UpgradesResponse = decode_body(&body).map_err(decode_error)?;
            seed_player_upgrades(&mut upgrades);
            debug!(tiers = upgrades.upgrades.len(), "decoded upgrades");
            Ok(CatalogData::Upgrades(Arc::new(upgrades)))
        }
    }
}

fn abandoned() -> CoreError {
    CoreError::Internal("catalog fetch task ended without settling".into())
}

fn mismatch(expected: Resource, data: &CatalogData) -> CoreError {
    CoreError::Internal(format!(
        "cache entry for {expected} holds {} data",
        data.resource()
    ))
}
