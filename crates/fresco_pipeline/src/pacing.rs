//! Per-job spacing of generator calls.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::time::Duration;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Spaces calls at least `delay` apart.
///
/// Each job builds its own pacer, so waiting here never blocks another job.
/// The first call passes immediately.
pub struct CallPacer {
    limiter: Option<DirectRateLimiter>,
}

impl CallPacer {
    /// Pacer allowing one call per `delay`. A zero delay never waits.
    pub fn new(delay: Duration) -> Self {
        Self {
            limiter: Quota::with_period(delay).map(RateLimiter::direct),
        }
    }

    /// Wait until the next call may go out.
    pub async fn ready(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for CallPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallPacer")
            .field("limited", &self.limiter.is_some())
            .finish()
    }
}
