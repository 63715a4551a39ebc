//! Single-worker request pacing
//!
//! Page scraping is sequential by design; the pacer enforces a minimum
//! interval between requests so the delay lives in one place rather than as
//! inline sleeps scattered through the scrape loop. Swapping in concurrency
//! later means replacing this type, not hunting for sleeps.

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive requests
pub struct Pacer {
    interval: Duration,
    last: Instant,
}

impl Pacer {
    /// Creates a pacer with the given minimum interval between requests
    ///
    /// The interval is measured from construction, so the first `wait` call
    /// also pauses. That matches the polite-delay contract: every page fetch
    /// is preceded by the delay.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Waits until the minimum interval since the previous request has passed
    pub async fn wait(&mut self) {
        let deadline = self.last + self.interval;
        tokio::time::sleep_until(deadline).await;
        self.last = Instant::now();
    }
}
