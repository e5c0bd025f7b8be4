//! Body of `GET /health`.

use serde::Serialize;

/// `healthy` or `degraded`, plus the crate version and per-check results.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Lookup round-trip against the configured alias store.
    pub store: CheckStatus,
}

/// Outcome of one check: `ok` or `error`, with a human-readable note.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
