//! Latency observation hook for serving reads.
//!
//! The store only reports durations; aggregation (histograms, exporters)
//! belongs to whoever installs the observer.

use std::fmt;
use std::time::Duration;

/// Operation a latency sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Search,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOp::Get => "get",
            StoreOp::Search => "search",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives one sample per completed `get` or `search`, failed calls included.
pub trait LatencyObserver: Send + Sync {
    fn observe(&self, op: StoreOp, elapsed: Duration);
}

/// Observer that discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LatencyObserver for NoopObserver {
    fn observe(&self, _op: StoreOp, _elapsed: Duration) {}
}
