//! Sleeper port for backoff delays.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Boxed future type alias used by [`Sleeper`] to keep the trait
/// dyn-compatible.
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Waits for a duration to elapse.
///
/// Abstracting the wait allows the retry wrapper's backoff schedule to be
/// asserted deterministically in tests by substituting a recording sleeper
/// that resolves immediately.
pub trait Sleeper: Send + Sync {
    /// Resolves after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}

impl<T: Sleeper + ?Sized> Sleeper for Arc<T> {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        (**self).sleep(duration)
    }
}
