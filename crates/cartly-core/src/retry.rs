// ── Bounded retry with backoff ──
//
// Wraps one fallible async operation. Attempts run strictly in sequence;
// between attempts the executor sleeps on the tokio timer so other tasks
// keep running.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::CoreError;

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// The same delay after every failed attempt.
    Fixed(Duration),
    /// `min(base * 2^(n-1), cap)` after failed attempt `n` (1-indexed).
    Exponential { base: Duration, cap: Duration },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-indexed).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential { base, cap } => 2u32
                .checked_pow(attempt.saturating_sub(1))
                .and_then(|factor| base.checked_mul(factor))
                .map_or(cap, |delay| delay.min(cap)),
        }
    }
}

/// Retry executor: at most `max_attempts` sequential attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl Default for RetryPolicy {
    /// Five attempts, exponential backoff from 1s capped at 30s.
    fn default() -> Self {
        Self::new(
            5,
            Backoff::Exponential {
                base: Duration::from_secs(1),
                cap: Duration::from_secs(30),
            },
        )
    }
}

impl RetryPolicy {
    /// A `max_attempts` of zero is treated as one.
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// Individual failures are logged and retried. Once the budget is
    /// spent the final failure is returned wrapped in
    /// [`CoreError::RetriesExhausted`].
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, CoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut attempt: u32 = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    warn!(error = %e, attempt, "final attempt failed, giving up");
                    return Err(CoreError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.backoff.delay_after(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
