// ── Subtab state machine ──
//
// Tracks the active storefront subtab and drives the view layer. Each
// selection clears every panel, then either shows the new subtab at once
// or waits on the cached fetch it depends on. A fetch that settles after
// the selection has moved on is dropped without touching the view.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{CatalogData, Subtab};
use crate::store::{CatalogCache, CatalogDeferred};
use crate::view::SubtabView;

/// The subtab selection state machine.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. The machine has no
/// terminal state; it lives as long as the storefront session.
#[derive(Clone)]
pub struct SubtabController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    cache: CatalogCache,
    view: Arc<dyn SubtabView>,
    /// The active subtab. Written only by `select`.
    active: watch::Sender<Subtab>,
    /// Serializes transitions against the staleness check + `show`, so a
    /// selection on another worker thread cannot slip in between them.
    transition: Mutex<()>,
    /// Display tasks waiting on a fetch.
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl SubtabController {
    pub fn new(cache: CatalogCache, view: Arc<dyn SubtabView>) -> Self {
        let (active, _) = watch::channel(Subtab::default());
        Self {
            inner: Arc::new(ControllerInner {
                cache,
                view,
                active,
                transition: Mutex::new(()),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// The currently selected subtab.
    pub fn active(&self) -> Subtab {
        *self.inner.active.borrow()
    }

    /// Observe selection changes.
    pub fn subscribe(&self) -> watch::Receiver<Subtab> {
        self.inner.active.subscribe()
    }

    /// Select by button index. Unknown indexes are ignored.
    pub fn select_index(&self, index: usize) {
        match Subtab::from_index(index) {
            Some(subtab) => self.select(subtab),
            None => warn!(index, "ignoring selection of unknown subtab"),
        }
    }

    /// Transition to `subtab`. Re-selecting the active subtab re-runs the
    /// transition.
    ///
    /// Returns immediately; a subtab backed by remote data is shown later,
    /// and only if it is still selected when its fetch settles.
    pub fn select(&self, subtab: Subtab) {
        let pending = {
            let _transition = self.lock_transition();

            self.inner.active.send_replace(subtab);
            debug!(%subtab, "subtab selected");

            let view = &self.inner.view;
            view.highlight(subtab);
            for panel in Subtab::ALL {
                view.clear(panel);
            }

            match subtab.resource() {
                Some(resource) => Some(self.inner.cache.fetch(resource)),
                None => {
                    view.show(subtab);
                    None
                }
            }
        };

        if let Some(deferred) = pending {
            self.spawn_display(subtab, deferred);
        }
    }

    /// Wait until every pending display task has finished.
    pub async fn settled(&self) {
        loop {
            let handles = std::mem::take(&mut *self.lock_handles());
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "subtab display task failed");
                }
            }
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn spawn_display(&self, subtab: Subtab, deferred: CatalogDeferred) {
        let controller = self.clone();
        let handle = self.inner.cache.runtime().spawn(async move {
            let outcome = deferred.wait().await;
            controller.finish(subtab, outcome);
        });

        let mut handles = self.lock_handles();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Show `subtab` if it is still the active one; drop the result
    /// otherwise.
    fn finish(&self, subtab: Subtab, outcome: Result<CatalogData, CoreError>) {
        let _transition = self.lock_transition();

        let current = self.active();
        if current != subtab {
            debug!(%subtab, active = %current, "dropping stale subtab result");
            return;
        }

        match outcome {
            Ok(_) => self.inner.view.show(subtab),
            Err(e) => {
                warn!(%subtab, error = %e, cause = %e.last_attempt(), "subtab data unavailable");
                self.inner.view.fetch_failed(subtab, &e);
            }
        }
    }

    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.inner
            .transition
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handles(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner
            .task_handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
