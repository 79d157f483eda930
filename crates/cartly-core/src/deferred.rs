// ── Externally settled, multi-waiter future ──
//
// A pending outcome that is settled once by its owner and awaited by any
// number of observers. The outcome lives in a `OnceLock`, so the first
// settlement wins atomically; waiters park on a `Notify`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio::sync::Notify;

struct Shared<T, E> {
    outcome: OnceLock<Result<T, E>>,
    settled: Notify,
}

/// Consumer half: awaits the outcome.
///
/// Cheaply cloneable; every clone observes the same settlement.
pub struct Deferred<T, E> {
    shared: Arc<Shared<T, E>>,
}

/// Owner half: settles the outcome exactly once.
///
/// A resolver from [`Deferred::pending`] that is dropped unsettled leaves
/// waiters pending forever. One from [`Deferred::pending_or_reject`]
/// rejects with its fallback error instead.
pub struct Resolver<T, E> {
    shared: Arc<Shared<T, E>>,
    on_abandon: Option<fn() -> E>,
}

impl<T, E> Deferred<T, E> {
    /// Create a pending deferred and the resolver that settles it.
    pub fn pending() -> (Resolver<T, E>, Self) {
        Self::with_abandon(None)
    }

    /// Like [`pending`](Self::pending), but dropping the resolver before
    /// it settles rejects with `on_abandon()`, so waiters never hang on a
    /// lost owner.
    pub fn pending_or_reject(on_abandon: fn() -> E) -> (Resolver<T, E>, Self) {
        Self::with_abandon(Some(on_abandon))
    }

    fn with_abandon(on_abandon: Option<fn() -> E>) -> (Resolver<T, E>, Self) {
        let shared = Arc::new(Shared {
            outcome: OnceLock::new(),
            settled: Notify::new(),
        });
        (
            Resolver {
                shared: Arc::clone(&shared),
                on_abandon,
            },
            Self { shared },
        )
    }

    pub fn is_settled(&self) -> bool {
        self.shared.outcome.get().is_some()
    }

    /// Returns `true` if both handles refer to the same pending outcome.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T: Clone, E: Clone> Deferred<T, E> {
    /// The outcome if already settled, without waiting.
    pub fn peek(&self) -> Option<Result<T, E>> {
        self.shared.outcome.get().cloned()
    }

    /// Wait for settlement and return a copy of the outcome.
    pub async fn wait(&self) -> Result<T, E> {
        loop {
            // Register interest before checking, so a settlement racing
            // with the check still wakes this waiter.
            let notified = self.shared.settled.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(outcome) = self.shared.outcome.get() {
                return outcome.clone();
            }

            notified.await;
        }
    }
}

impl<T, E> Resolver<T, E> {
    /// Fulfil the deferred. Returns `false` if it was already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Reject the deferred. Returns `false` if it was already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    fn settle(&self, outcome: Result<T, E>) -> bool {
        if self.shared.outcome.set(outcome).is_err() {
            return false;
        }
        self.shared.settled.notify_waiters();
        true
    }
}

impl<T, E> Drop for Resolver<T, E> {
    fn drop(&mut self) {
        if let Some(on_abandon) = self.on_abandon.take() {
            if self.shared.outcome.get().is_none() {
                self.settle(Err(on_abandon()));
            }
        }
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("settled", &self.shared.outcome.get().is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio_test::{assert_pending, assert_ready_eq, task};

    use super::*;

    #[test]
    fn second_settlement_is_ignored() {
        let (resolver, deferred) = Deferred::<u32, String>::pending();

        assert!(resolver.resolve(1));
        assert!(!resolver.resolve(2));
        assert!(!resolver.reject("late".into()));

        assert_eq!(deferred.peek(), Some(Ok(1)));
    }

    #[test]
    fn rejection_wins_when_first() {
        let (resolver, deferred) = Deferred::<u32, String>::pending();

        assert!(resolver.reject("boom".into()));
        assert!(!resolver.resolve(7));

        assert_eq!(deferred.peek(), Some(Err("boom".to_string())));
    }

    #[test]
    fn waiters_before_settlement_are_woken() {
        let (resolver, deferred) = Deferred::<u32, String>::pending();

        let mut first = task::spawn(deferred.wait());
        let other = deferred.clone();
        let mut second = task::spawn(other.wait());
        assert_pending!(first.poll());
        assert_pending!(second.poll());
        assert!(!deferred.is_settled());

        resolver.resolve(42);

        assert!(first.is_woken());
        assert!(second.is_woken());
        assert_ready_eq!(first.poll(), Ok(42));
        assert_ready_eq!(second.poll(), Ok(42));
    }

    #[test]
    fn waiters_after_settlement_see_same_outcome() {
        let (resolver, deferred) = Deferred::<u32, String>::pending();
        resolver.reject("gone".into());
        resolver.resolve(3);

        let mut late = task::spawn(deferred.wait());
        assert_ready_eq!(late.poll(), Err("gone".to_string()));
    }

    #[test]
    fn dropped_resolver_rejects_with_fallback() {
        let (resolver, deferred) =
            Deferred::<u32, String>::pending_or_reject(|| "abandoned".to_string());

        let mut waiter = task::spawn(deferred.wait());
        assert_pending!(waiter.poll());

        drop(resolver);

        assert!(waiter.is_woken());
        assert_ready_eq!(waiter.poll(), Err("abandoned".to_string()));
    }

    #[test]
    fn settled_resolver_drop_keeps_outcome() {
        let (resolver, deferred) =
            Deferred::<u32, String>::pending_or_reject(|| "abandoned".to_string());
        resolver.resolve(9);
        drop(resolver);

        assert_eq!(deferred.peek(), Some(Ok(9)));
    }

    #[test]
    fn plain_pending_stays_pending_after_drop() {
        let (resolver, deferred) = Deferred::<u32, String>::pending();
        drop(resolver);

        assert!(!deferred.is_settled());
    }

    #[tokio::test]
    async fn settlement_from_another_task() {
        let (resolver, deferred) = Deferred::<String, String>::pending();

        let waiter = tokio::spawn({
            let deferred = deferred.clone();
            async move { deferred.wait().await }
        });
        tokio::task::yield_now().await;

        resolver.resolve("done".into());

        assert_eq!(waiter.await.unwrap(), Ok("done".to_string()));
        assert!(deferred.ptr_eq(&deferred.clone()));
    }
}
