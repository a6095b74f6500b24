//! Recording adapter for the `Sleeper` port.

use std::sync::Mutex;
use std::time::Duration;

use crate::ports::sleeper::{SleepFuture, Sleeper};

/// Records every requested delay and resolves immediately.
///
/// Lets retry tests assert the exact backoff schedule without waiting on a
/// real clock.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Creates a sleeper with no recorded delays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The delays requested so far, in order.
    #[must_use]
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("sleeper lock poisoned").clone()
    }

    /// Sum of all requested delays.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.delays().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        self.delays.lock().expect("sleeper lock poisoned").push(duration);
        Box::pin(async {})
    }
}
