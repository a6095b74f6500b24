//! Live adapter for the `Sleeper` port using the tokio timer.

use std::time::Duration;

use crate::ports::sleeper::{SleepFuture, Sleeper};

/// Sleeper backed by `tokio::time::sleep`.
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(tokio::time::sleep(duration))
    }
}
