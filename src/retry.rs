//! Generic retry wrapper for transient backend failures.
//!
//! Retry is an explicit loop over attempt count and next delay rather than
//! nested timers: the delay goes through the [`Sleeper`] port, so tests
//! substitute a recording sleeper and assert the backoff schedule without
//! waiting on a real clock.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::ports::model::BackendError;
use crate::ports::sleeper::Sleeper;

/// Bounded exponential-backoff policy for a single backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total call budget, first attempt included.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each attempt after.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay: Duration::from_secs(1) }
    }
}

impl RetryPolicy {
    /// The wait after a failed `attempt` (1-based): `base * 2^(attempt-1)`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Runs `op`, retrying transient failures with exponential backoff.
///
/// The wrapper knows nothing about which feature it is retrying. A
/// non-transient error propagates immediately after exactly one call; a
/// transient error is retried until the attempt budget is exhausted, at
/// which point the final error propagates unchanged, with no wrapping that
/// hides the cause.
///
/// # Errors
///
/// Returns the operation's own [`BackendError`] on a fatal failure or when
/// attempts run out.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: F,
) -> Result<T, BackendError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "transient backend failure, backing off"
                );
                sleeper.sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
