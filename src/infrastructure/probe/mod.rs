//! Outbound reachability checks for submitted URLs.
//!
//! Provides a [`ReachabilityProbe`] trait with two implementations:
//! - [`HttpProbe`] - Real outbound `GET` with a timeout
//! - [`NullProbe`] - No-op implementation for disabled probing/tests

mod http_probe;
mod null_probe;
mod service;

pub use http_probe::{HttpProbe, ProbeError};
pub use null_probe::NullProbe;
pub use service::{ProbeOutcome, ReachabilityProbe};

#[cfg(test)]
pub use service::MockReachabilityProbe;
