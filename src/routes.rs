//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Banner
//! - `GET  /health`      - Health check
//! - `POST /add`         - Shorten
//! - `GET|DELETE /r/{code}` - Resolve / revoke
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::alias_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
