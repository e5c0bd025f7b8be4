//! Probe trait and result types.

use async_trait::async_trait;
use std::fmt;

/// Result of a reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target answered with a success status.
    Reachable,
    /// The target answered with a non-success status or could not be
    /// contacted before the timeout.
    Unreachable { reason: String },
}

impl ProbeOutcome {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reachable => write!(f, "reachable"),
            Self::Unreachable { reason } => write!(f, "unreachable: {}", reason),
        }
    }
}

/// Best-effort check that a submitted URL currently responds.
///
/// Implementations never fail: transport problems are reported as
/// [`ProbeOutcome::Unreachable`] and the caller decides what to do with them.
///
/// # Implementations
///
/// - [`crate::infrastructure::probe::HttpProbe`] - Outbound GET with a timeout
/// - [`crate::infrastructure::probe::NullProbe`] - Always reachable, for disabled probing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Checks `url`.
    async fn check(&self, url: &str) -> ProbeOutcome;
}
