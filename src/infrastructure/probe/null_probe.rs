//! No-op probe for disabled probing or tests.

use super::service::{ProbeOutcome, ReachabilityProbe};
use async_trait::async_trait;
use tracing::debug;

/// A probe that reports every URL as reachable without any I/O.
///
/// Used when `PROBE_POLICY=off` and in tests that must not touch the network.
pub struct NullProbe;

impl NullProbe {
    /// Creates a new NullProbe instance.
    pub fn new() -> Self {
        debug!("Using NullProbe (reachability checks disabled)");
        Self
    }
}

impl Default for NullProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReachabilityProbe for NullProbe {
    async fn check(&self, _url: &str) -> ProbeOutcome {
        ProbeOutcome::Reachable
    }
}
