//! HTTP reachability probe.

use super::service::{ProbeOutcome, ReachabilityProbe};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Errors that can occur while building the probe client.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Probe that issues a `GET` against the submitted URL.
///
/// Redirects are followed; any final `2xx` status counts as reachable. The
/// client carries a hard timeout so a slow target cannot hold a request
/// open indefinitely.
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Builds a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn check(&self, url: &str) -> ProbeOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                debug!("probe timed out for {}: {}", url, e);
                return ProbeOutcome::unreachable(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                ));
            }
            Err(e) => {
                debug!("probe network error for {}: {}", url, e);
                return ProbeOutcome::unreachable(format!("request failed: {}", e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("probe ok for {}: {}", url, status);
            ProbeOutcome::Reachable
        } else {
            debug!("probe non-success status for {}: {}", url, status);
            ProbeOutcome::unreachable(format!("responded with status {}", status))
        }
    }
}
