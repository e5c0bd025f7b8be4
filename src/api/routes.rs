//! Alias route configuration.

use crate::api::handlers::{
    missing_code_handler, redirect_handler, revoke_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Alias routes.
///
/// # Endpoints
///
/// - `POST   /add`      - Create a short alias
/// - `GET    /r/{code}` - Redirect to the target (307)
/// - `DELETE /r/{code}` - Revoke the alias
/// - `GET|DELETE /r`    - Missing code, 400
pub fn alias_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(shorten_handler))
        .route("/r/{code}", get(redirect_handler).delete(revoke_handler))
        .route("/r", get(missing_code_handler).delete(missing_code_handler))
}
