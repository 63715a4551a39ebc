//! Discovery progress reporting
//!
//! One `DiscoveryProgress` record exists per discovery run. The pipeline
//! mutates it in place and re-emits a snapshot after every externally
//! observable step, so a streaming layer (SSE, a channel, a closure) can
//! forward snapshots verbatim.

use serde::{Deserialize, Serialize};

/// The phase a discovery run is currently in
///
/// Phases are strictly sequential and never re-entered:
/// discovering -> building -> scraping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Discovering,
    Building,
    Scraping,
}

/// Snapshot of a discovery run's progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryProgress {
    pub phase: Phase,
    pub urls_found: usize,
    pub processed: usize,
    pub queue: usize,
    pub total: usize,
    /// Human-readable description of the current step
    pub current_action: String,
}

impl DiscoveryProgress {
    /// Creates the initial progress record for a new run
    pub fn new() -> Self {
        Self {
            phase: Phase::Discovering,
            urls_found: 0,
            processed: 0,
            queue: 0,
            total: 0,
            current_action: "Looking for sitemap...".to_string(),
        }
    }
}

impl Default for DiscoveryProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver for progress snapshots
///
/// Implemented for closures and for unbounded tokio channels; `NullSink`
/// discards everything for callers that do not observe progress.
pub trait ProgressSink {
    fn emit(&mut self, progress: &DiscoveryProgress);
}

impl<F: FnMut(&DiscoveryProgress)> ProgressSink for F {
    fn emit(&mut self, progress: &DiscoveryProgress) {
        self(progress);
    }
}

/// Sink that forwards snapshots over an unbounded tokio channel
pub struct ChannelSink(pub tokio::sync::mpsc::UnboundedSender<DiscoveryProgress>);

impl ProgressSink for ChannelSink {
    fn emit(&mut self, progress: &DiscoveryProgress) {
        // A dropped receiver means nobody is watching; that is not an error.
        let _ = self.0.send(progress.clone());
    }
}

/// Sink that discards all progress snapshots
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _progress: &DiscoveryProgress) {}
}
