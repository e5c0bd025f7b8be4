//! Handlers for health check and index endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store is usable
/// - **503 Service Unavailable**: Store file is missing, unreadable or malformed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "file backend reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks the store by running a lookup through the service.
async fn check_store(state: &AppState) -> CheckStatus {
    match state.alias_service.check_store().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} backend reachable", state.store_backend)),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{} backend error: {}", state.store_backend, e)),
        },
    }
}

/// Plain-text banner on `GET /`.
pub async fn index_handler() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
